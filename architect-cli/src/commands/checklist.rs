use anyhow::Result;
use architect_service::checklist::CHECKLIST;
use colored::Colorize;

use crate::utils;

pub fn execute() -> Result<()> {
    utils::section("Implementation Checklist");
    for item in CHECKLIST {
        println!("  {} {}", "□".cyan(), item);
    }
    Ok(())
}
