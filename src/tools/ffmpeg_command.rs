use crate::component::video_thumbnailer::ResolvedSize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// 每次只擷取一張影格
pub const FRAME_COUNT: u32 = 1;

/// 兩段式 seek 的前置緩衝時間（秒）
const SEEK_MARGIN: f64 = 2.0;

/// 單張影格擷取請求
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenshotRequest {
    pub source_path: PathBuf,
    pub output_directory: PathBuf,
    pub output_filename: String,
    pub time_offset_seconds: f64,
    pub count: u32,
    pub size: ResolvedSize,
}

impl ScreenshotRequest {
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_directory.join(&self.output_filename)
    }
}

pub struct FfmpegCommand<'a> {
    ffmpeg_path: &'a Path,
    request: &'a ScreenshotRequest,
}

impl<'a> FfmpegCommand<'a> {
    #[must_use]
    pub const fn new(ffmpeg_path: &'a Path, request: &'a ScreenshotRequest) -> Self {
        Self {
            ffmpeg_path,
            request,
        }
    }

    /// 組出 ffmpeg 參數（使用兩段式 seek 加速）
    ///
    /// 1. `-ss` 在 `-i` 前：快速跳轉到最近的關鍵幀
    /// 2. `-ss` 在 `-i` 後：精準解碼到目標時間點
    #[must_use]
    pub fn build_args(&self) -> Vec<OsString> {
        let request = self.request;
        let timestamp = request.time_offset_seconds.max(0.0);
        let t0 = (timestamp - SEEK_MARGIN).max(0.0);
        let delta = timestamp - t0;

        let mut args: Vec<OsString> = vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-loglevel".into(),
            "error".into(),
        ];

        if t0 > 0.0 {
            args.push("-ss".into());
            args.push(format!("{t0:.3}").into());
        }

        args.push("-i".into());
        args.push(request.source_path.clone().into_os_string());

        if delta > 0.0 {
            args.push("-ss".into());
            args.push(format!("{delta:.3}").into());
        }

        let size = request.size;
        let output_args: [OsString; 11] = [
            "-frames:v".into(),
            request.count.to_string().into(),
            "-an".into(),
            "-sn".into(),
            "-dn".into(),
            "-vf".into(),
            format!("scale={}:{}", size.width, size.height).into(),
            "-q:v".into(),
            "2".into(),
            "-y".into(),
            request.output_path().into_os_string(),
        ];
        args.extend(output_args);

        args
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new(self.ffmpeg_path);
        cmd.args(self.build_args()).kill_on_drop(true);
        cmd
    }
}
