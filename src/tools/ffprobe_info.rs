use crate::error::ThumbnailError;
use log::debug;
use serde::Deserialize;
use std::path::Path;
use tokio::process::Command;

/// 影片串流資訊
///
/// 欄位為 `None` 代表來源串流沒有回報該屬性。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VideoDescriptor {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub duration_seconds: Option<f64>,
}

impl VideoDescriptor {
    /// 寬高皆已知時回傳 `(width, height)`
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width?, self.height?))
    }
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
}

/// 使用 ffprobe 取得影片資訊
///
/// ffprobe 無法開啟或解析來源時回傳 `ThumbnailError::Probe`；
/// 沒有視訊串流時回傳全部為空的 `VideoDescriptor`。
pub async fn get_video_info(
    ffprobe_path: &Path,
    path: &Path,
) -> Result<VideoDescriptor, ThumbnailError> {
    let output = Command::new(ffprobe_path)
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| ThumbnailError::probe(path, format!("無法執行 ffprobe: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ThumbnailError::probe(
            path,
            format!("ffprobe 執行失敗: {}", stderr.trim()),
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let descriptor = parse_probe_output(&stdout).map_err(|e| ThumbnailError::probe(path, e))?;

    debug!("ffprobe {}: {descriptor:?}", path.display());
    Ok(descriptor)
}

/// 解析 ffprobe 的 JSON 輸出
pub fn parse_probe_output(json: &str) -> Result<VideoDescriptor, String> {
    let probe: FfprobeOutput =
        serde_json::from_str(json).map_err(|e| format!("無法解析 ffprobe 輸出: {e}"))?;

    // 找到第一個視訊串流
    let Some(video_stream) = probe.streams.as_ref().and_then(|streams| {
        streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
    }) else {
        return Ok(VideoDescriptor::default());
    };

    // 尺寸為 0 視同未回報
    let width = video_stream.width.filter(|&w| w > 0);
    let height = video_stream.height.filter(|&h| h > 0);

    // 影片長度優先取串流，其次取容器
    let duration_seconds = video_stream
        .duration
        .as_deref()
        .and_then(parse_duration)
        .or_else(|| {
            probe
                .format
                .as_ref()
                .and_then(|f| f.duration.as_deref())
                .and_then(parse_duration)
        });

    Ok(VideoDescriptor {
        width,
        height,
        duration_seconds,
    })
}

fn parse_duration(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
}
