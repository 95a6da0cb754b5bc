use crate::component::video_thumbnailer::parse_dimension_input;
use crate::config::Config;
use crate::menu::handlers::{run_folder_thumbnails, run_single_thumbnail};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style("=== 影片縮圖產生器 ===").cyan().bold());
    println!("{}", style("按 ESC 離開").dim());

    let options = ["單一影片縮圖", "資料夾批次縮圖", "設定", "離開"];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("請選擇功能")
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_single_thumbnail(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            run_folder_thumbnails(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(2) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(3) | None => Ok(false),
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        let thumbnail = &config.settings.thumbnail;
        println!("{}", style("=== 設定 ===").cyan().bold());
        println!("{}", style("按 ESC 返回").dim());
        println!(
            "\n{} {:.2}s",
            style("擷取時間點:").dim(),
            thumbnail.time_offset_seconds
        );
        println!(
            "{} {}",
            style("預設寬度:").dim(),
            format_dimension(thumbnail.default_width)
        );
        println!(
            "{} {}",
            style("預設高度:").dim(),
            format_dimension(thumbnail.default_height)
        );
        println!();

        let options = ["擷取時間點", "預設尺寸", "返回"];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("請選擇要修改的設定")
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => edit_time_offset(config)?,
            Some(1) => edit_default_size(config)?,
            Some(2) | None => break,
            _ => unreachable!(),
        }
    }

    Ok(())
}

fn edit_time_offset(config: &mut Config) -> Result<()> {
    let offset: f64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("擷取時間點（秒）")
        .default(config.settings.thumbnail.time_offset_seconds)
        .validate_with(|v: &f64| {
            if v.is_finite() && *v >= 0.0 {
                Ok(())
            } else {
                Err("必須為非負數")
            }
        })
        .interact_text()?;

    config.settings.thumbnail.time_offset_seconds = offset;
    save(config)
}

fn edit_default_size(config: &mut Config) -> Result<()> {
    let thumbnail = &config.settings.thumbnail;
    let width = prompt_optional("預設寬度（留空表示不指定）", thumbnail.default_width)?;
    let height =
        prompt_optional("預設高度（留空表示不指定）", thumbnail.default_height)?;

    config.settings.thumbnail.default_width = width;
    config.settings.thumbnail.default_height = height;
    save(config)
}

fn prompt_optional(prompt: &str, current: Option<f64>) -> Result<Option<f64>> {
    let text: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(current.map(|v| v.to_string()).unwrap_or_default())
        .allow_empty(true)
        .validate_with(|input: &String| parse_dimension_input(input).map(|_| ()))
        .interact_text()?;
    parse_dimension_input(&text).map_err(anyhow::Error::msg)
}

fn save(config: &Config) -> Result<()> {
    config.save()?;
    println!("\n{}", style("設定已儲存").green());
    std::thread::sleep(std::time::Duration::from_secs(1));
    Ok(())
}

fn format_dimension(value: Option<f64>) -> String {
    value.map_or_else(|| "不指定".to_string(), |v| v.to_string())
}
