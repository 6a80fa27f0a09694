use std::env;
use std::fs;

use anyhow::{bail, Context, Result};

use bt_bencoding::BeDict;

fn main() -> Result<()> {
    // 获取命令行参数
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        bail!("Usage: {} <torrent_file>", args[0]);
    }

    let file_path = &args[1];
    let buffer = fs::read(file_path).with_context(|| format!("Failed to read file {file_path}"))?;

    let dict = BeDict::parse_buffer(&buffer)
        .with_context(|| format!("Failed to decode file {file_path}"))?;

    if let Some(digest) = dict.info_digest() {
        println!("info hash: {digest}");
    }
    println!("{}", dict.to_json_pretty());

    Ok(())
}
