//! Key generation tool for rotating the Tightlock API key

use tightlock_env::config::KeyConfig;
use tightlock_env::env_file::API_KEY_VAR;
use tightlock_env::keygen::generate_api_key;

fn main() -> anyhow::Result<()> {
    let key = generate_api_key(KeyConfig::default())?;

    eprintln!("=== Tightlock API Key ===\n");
    eprintln!("Replace the {} line in your .env file and restart", API_KEY_VAR);
    eprintln!("the tightlock-api container for the new key to take effect.\n");

    // Machine-readable line on stdout
    println!("{}={}", API_KEY_VAR, key);
    Ok(())
}
