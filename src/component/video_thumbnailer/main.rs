use super::dimension_resolver::SizeConstraint;
use super::thumbnail_generator::ThumbnailGenerator;
use crate::config::{Config, add_recent_path};
use crate::signal::is_shutdown_requested;
use crate::tools::{
    FfmpegEngine, MediaEngine, VideoFileInfo, ensure_directory_exists, scan_video_files,
    validate_directory_exists, validate_file_exists,
};
use anyhow::{Context, Result};
use console::style;
use dialoguer::Input;
use log::{error, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tokio::runtime::Runtime;

/// 批次產生結果
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub total_videos: usize,
    pub successful: usize,
    pub undetermined: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// 互動式縮圖產生器
pub struct VideoThumbnailer<'a> {
    config: &'a mut Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl<'a> VideoThumbnailer<'a> {
    pub const fn new(config: &'a mut Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    /// 為單一影片產生縮圖
    pub fn run_single(&mut self) -> Result<()> {
        println!("{}", style("=== 單一影片縮圖 ===").cyan().bold());

        let source_path = PathBuf::from(self.prompt_path("請輸入影片檔案路徑")?);
        validate_file_exists(&source_path)?;

        let default_output = source_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_string_lossy()
            .to_string();
        let output_dir =
            PathBuf::from(prompt_text("請輸入縮圖輸出資料夾路徑", &default_output)?);
        ensure_directory_exists(&output_dir)?;

        let constraint = self.prompt_constraint()?;
        let generator = self.build_generator();

        let result = runtime()?.block_on(generator.generate_thumbnail(
            &source_path,
            &output_dir,
            &constraint,
        ));

        match result {
            Ok(Some(output_path)) => {
                println!(
                    "  {} 縮圖已建立: {}",
                    style("✓").green(),
                    output_path.display()
                );
            }
            Ok(None) => {
                println!(
                    "  {} 無法判定影片尺寸，未產生縮圖",
                    style("⤳").yellow()
                );
            }
            Err(e) => {
                error!("產生縮圖失敗 {}: {e}", source_path.display());
                println!("  {} 產生失敗: {}", style("✗").red(), e);
            }
        }

        self.remember_path(&source_path.to_string_lossy())
    }

    /// 為資料夾內所有影片產生縮圖
    pub fn run_folder(&mut self) -> Result<()> {
        println!("{}", style("=== 資料夾批次縮圖 ===").cyan().bold());

        let input_path = self.prompt_path("請輸入影片資料夾路徑")?;
        let input_dir = PathBuf::from(&input_path);
        validate_directory_exists(&input_dir)?;

        let output_dir =
            PathBuf::from(prompt_text("請輸入縮圖輸出資料夾路徑", &input_path)?);
        ensure_directory_exists(&output_dir)?;

        println!("{}", style("掃描影片檔案中...").dim());
        let video_files = scan_video_files(&input_dir, &self.config.settings.thumbnail);

        if video_files.is_empty() {
            println!("{}", style("找不到任何影片檔案").yellow());
            return self.remember_path(&input_path);
        }

        println!(
            "{}",
            style(format!("找到 {} 個影片檔案", video_files.len())).green()
        );

        let constraint = self.prompt_constraint()?;
        let generator = self.build_generator();

        println!();
        println!("{}", style("開始產生縮圖...").cyan());

        let result = runtime()?.block_on(process_videos(
            &generator,
            &video_files,
            &output_dir,
            &constraint,
            &self.shutdown_signal,
        ));

        print_summary(&result);
        self.remember_path(&input_path)
    }

    fn build_generator(&self) -> ThumbnailGenerator<FfmpegEngine> {
        let settings = &self.config.settings.thumbnail;
        ThumbnailGenerator::with_options(settings.engine(), settings.extraction_options())
    }

    fn prompt_path(&self, prompt: &str) -> Result<String> {
        let recent = self
            .config
            .settings
            .recent_paths
            .first()
            .cloned()
            .unwrap_or_default();
        prompt_text(prompt, &recent)
    }

    fn prompt_constraint(&self) -> Result<SizeConstraint> {
        let defaults = self.config.settings.thumbnail.default_constraint();
        let width = prompt_dimension("縮圖寬度（留空表示不指定）", defaults.width)?;
        let height = prompt_dimension("縮圖高度（留空表示不指定）", defaults.height)?;
        Ok(SizeConstraint::new(width, height))
    }

    fn remember_path(&mut self, path: &str) -> Result<()> {
        add_recent_path(&mut self.config.settings, path);
        self.config.save()
    }
}

/// 依序處理影片，收到中斷訊號時停止
pub async fn process_videos<E: MediaEngine>(
    generator: &ThumbnailGenerator<E>,
    videos: &[VideoFileInfo],
    output_dir: &Path,
    constraint: &SizeConstraint,
    shutdown_signal: &AtomicBool,
) -> GenerationResult {
    let mut result = GenerationResult {
        total_videos: videos.len(),
        ..GenerationResult::default()
    };
    let mut produced: HashSet<PathBuf> = HashSet::new();

    for (index, video) in videos.iter().enumerate() {
        if is_shutdown_requested(shutdown_signal) {
            warn!("收到中斷訊號，停止處理");
            break;
        }

        println!(
            "\n{} [{}/{}] {}",
            style("處理中").cyan(),
            index + 1,
            videos.len(),
            style(video.path.display()).bold()
        );

        let request = match generator
            .plan_thumbnail(&video.path, output_dir, constraint)
            .await
        {
            Ok(Some(request)) => request,
            Ok(None) => {
                println!("  {} 無法判定影片尺寸，跳過", style("⤳").yellow());
                result.undetermined += 1;
                continue;
            }
            Err(e) => {
                error!("處理影片失敗 {}: {e}", video.path.display());
                println!("  {} 處理失敗: {}", style("✗").red(), e);
                result.failed += 1;
                continue;
            }
        };

        // 同名影片會產生相同的縮圖檔名，保留先產生的那一張
        let output_path = request.output_path();
        if produced.contains(&output_path) {
            warn!(
                "縮圖 {} 已由本批次其他影片產生，略過: {}",
                output_path.display(),
                video.path.display()
            );
            println!(
                "  {} 縮圖檔名與其他影片相同，跳過: {}",
                style("⤳").yellow(),
                request.output_filename
            );
            result.skipped += 1;
            continue;
        }

        match generator.extract(&request).await {
            Ok(output_path) => {
                println!("  {} {}", style("✓").green(), request.output_filename);
                produced.insert(output_path);
                result.successful += 1;
            }
            Err(e) => {
                error!("處理影片失敗 {}: {e}", video.path.display());
                println!("  {} 處理失敗: {}", style("✗").red(), e);
                result.failed += 1;
            }
        }
    }

    result
}

fn print_summary(result: &GenerationResult) {
    println!();
    println!("{}", style("=== 縮圖產生摘要 ===").cyan().bold());
    println!("  總計: {} 個影片", result.total_videos);
    println!("  成功: {} 個", style(result.successful).green());

    if result.undetermined > 0 {
        println!("  無法判定尺寸: {} 個", style(result.undetermined).yellow());
    }

    if result.skipped > 0 {
        println!("  檔名重複跳過: {} 個", style(result.skipped).yellow());
    }

    if result.failed > 0 {
        println!("  失敗: {} 個", style(result.failed).red());
    }

    info!(
        "縮圖產生完成 - 成功: {}, 無法判定: {}, 跳過: {}, 失敗: {}",
        result.successful, result.undetermined, result.skipped, result.failed
    );
}

fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("無法建立非同步執行環境")
}

fn prompt_text(prompt: &str, initial: &str) -> Result<String> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .interact_text()?;
    Ok(text.trim().to_string())
}

fn prompt_dimension(prompt: &str, default: Option<f64>) -> Result<Option<f64>> {
    let initial = default.map(|v| v.to_string()).unwrap_or_default();
    let text: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .validate_with(|input: &String| parse_dimension_input(input).map(|_| ()))
        .interact_text()?;
    parse_dimension_input(&text).map_err(anyhow::Error::msg)
}

/// 解析尺寸輸入，空字串代表不指定
pub fn parse_dimension_input(input: &str) -> Result<Option<f64>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let value: f64 = input
        .parse()
        .map_err(|_| format!("請輸入數字: {input}"))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(format!("尺寸必須為正數: {input}"));
    }

    Ok(Some(value))
}
