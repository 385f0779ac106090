use anyhow::{Context, Result};
use architect_service::{advice::AdviceService, config::Config};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::utils;

pub async fn execute(question: Vec<String>, sets: Vec<String>) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let app = super::resolve_app_config(&config.defaults, None, &sets)?;

    if config.advice.api_key().is_none() {
        utils::warning("No API key configured (set GEMINI_API_KEY); the answer will be the fallback text");
    }

    let advisor = AdviceService::from_config(&config.advice)?;
    let question = question.join(" ");

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")?
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );
    pb.set_message("Thinking...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let advice = advisor.ask(&question, &app).await;
    pb.finish_and_clear();
    let advice = advice?;

    println!("{}", "Expert Advice:".bold());
    println!("{}", advice.answer);

    if advice.fallback {
        println!();
        utils::info(&format!(
            "Model {} could not be reached; run with --verbose for details",
            config.advice.model.cyan()
        ));
    }

    Ok(())
}
