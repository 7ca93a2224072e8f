//! Welcome banner and prompt shown before reading a word.

use crate::consts::{AUTHOR, HOMEPAGE};

/// The question asked before reading the word.
pub const PROMPT: &str = "What word do you want to check? (example: impostor) : ";

/// Print the welcome banner.
pub fn print_banner() {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║          W O R D C H E C K            ║
   ║     welcome to the word checker       ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
    );
}
