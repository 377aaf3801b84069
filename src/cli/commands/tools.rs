//! External tool checks.

use crate::fetch::ytdlp;

use super::print_ytdlp_install_instructions;

/// Check if yt-dlp is installed
pub fn cmd_check_tools() -> anyhow::Result<()> {
    println!("Checking external tools...");
    println!();

    match ytdlp::get_ytdlp_version() {
        Some(version) => {
            println!("✓ yt-dlp: {}", version);
            Ok(())
        }
        None => {
            print_ytdlp_install_instructions();
            Err(crate::error::Error::ToolNotFound("yt-dlp".to_string()).into())
        }
    }
}
