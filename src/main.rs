use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use regex2dfa::{compile_stages, Dfa, Stages};

/// Translate a regular expression into a minimized deterministic finite automaton
#[derive(Parser, Debug)]
#[command(name = "regex2dfa")]
#[command(about = "Regular expression to NFA, DFA and minimal DFA", long_about = None)]
struct Args {
    /// Expression over a-z and 0-9 with `|`/`+`, `*`, `.` and parentheses
    #[arg(value_name = "REGEX", default_value = "1(0+1)*0")]
    regex: String,

    /// Print the NFA, DFA and minimal DFA tables
    #[arg(short, long)]
    display: bool,

    /// Include the NFA subset behind each DFA state
    #[arg(short, long)]
    show_set: bool,

    /// Write afn.dot, afd.dot and afdmin.dot
    #[arg(short, long)]
    generate: bool,

    /// Render each generated file to PNG with `dot`
    #[arg(long, requires = "generate")]
    png: bool,

    /// Directory for generated files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let stages = compile_stages(&args.regex)
        .with_context(|| format!("cannot compile `{}`", args.regex))?;

    if args.display || args.show_set || !args.generate {
        display(&args.regex, &stages, args.show_set);
    }

    if args.generate {
        generate(&stages, &args.out_dir, args.png)?;
    }

    Ok(())
}

fn banner(title: &str, regex: &str) {
    let heading = format!("{} : {}", title, regex);
    println!("{}", heading);
    println!("{}", "-".repeat(heading.len()));
}

fn display_dfa(dfa: &Dfa, show_set: bool) {
    if show_set {
        println!("{:#}", dfa);
    } else {
        println!("{}", dfa);
    }
}

fn display(regex: &str, stages: &Stages, show_set: bool) {
    banner("NFA", regex);
    println!("Postfix = {}", stages.postfix);
    println!("{}", stages.nfa);
    banner("DFA", regex);
    display_dfa(&stages.dfa, show_set);
    banner("Minimal DFA", regex);
    display_dfa(&stages.min, show_set);
}

fn generate(stages: &Stages, dir: &Path, png: bool) -> Result<()> {
    let nfa_file = dir.join("afn.dot");
    stages
        .nfa
        .write(&nfa_file)
        .with_context(|| format!("cannot write {}", nfa_file.display()))?;
    let dfa_file = dir.join("afd.dot");
    stages
        .dfa
        .write(&dfa_file)
        .with_context(|| format!("cannot write {}", dfa_file.display()))?;
    let min_file = dir.join("afdmin.dot");
    stages
        .min
        .write(&min_file)
        .with_context(|| format!("cannot write {}", min_file.display()))?;

    for file in [nfa_file, dfa_file, min_file].iter() {
        info!("wrote {}", file.display());
        if png {
            render_png(file)?;
        }
    }
    Ok(())
}

fn render_png(dot_file: &Path) -> Result<()> {
    let png_file = dot_file.with_extension("png");
    let status = Command::new("dot")
        .arg("-Tpng")
        .arg(dot_file)
        .arg("-o")
        .arg(&png_file)
        .status()
        .context("cannot run graphviz `dot`")?;
    if !status.success() {
        bail!("`dot` failed on {} ({})", dot_file.display(), status);
    }
    info!("rendered {}", png_file.display());
    Ok(())
}
