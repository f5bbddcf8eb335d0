use clap::CommandFactory;
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;
use std::path::PathBuf;

use covgate::cli::Cli;

fn main() -> Result<(), Error> {
    let outdir = PathBuf::from(env::var_os("OUT_DIR").unwrap_or_else(|| "completions".into()));
    std::fs::create_dir_all(&outdir)?;

    let mut cmd = Cli::command();

    generate_to(Bash, &mut cmd, "covgate", &outdir)?;
    generate_to(Zsh, &mut cmd, "covgate", &outdir)?;
    generate_to(Fish, &mut cmd, "covgate", &outdir)?;

    println!("Generated completion scripts in: {}", outdir.display());
    println!("\nFor Bash, add this line to your ~/.bashrc:");
    println!("source {}/covgate.bash", outdir.display());
    println!("\nFor Zsh, copy the file to your completions directory:");
    println!("cp {}/_covgate ~/.zsh/completions/_covgate", outdir.display());
    println!("\nFor Fish:");
    println!(
        "cp {}/covgate.fish ~/.config/fish/completions/",
        outdir.display()
    );

    Ok(())
}
