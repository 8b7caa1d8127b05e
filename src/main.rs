#![allow(clippy::cargo_common_metadata)]
use anyhow::Result;
use yay_args::{cli, utils::Input};

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let mut input = Input::stdin();
    let mut stdout = std::io::stdout().lock();

    cli::run(&argv, &mut input, &mut stdout)
}
