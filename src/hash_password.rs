//! Prints an Argon2 hash for `ADMIN_PASSWORD_HASH`.
//!
//! Usage: `hash-password <password>`, or pipe the password on stdin.

use std::io::{self, BufRead};

use color_eyre::eyre::{eyre, Result};
use slotbook_api::middleware::auth::hash_password;

fn main() -> Result<()> {
    color_eyre::install()?;

    let password = match std::env::args().nth(1) {
        Some(password) => password,
        None => {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if password.is_empty() {
        return Err(eyre!("Password must not be empty"));
    }

    println!("{}", hash_password(&password)?);
    Ok(())
}
