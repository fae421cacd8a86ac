//! muz-workshop: headless front-end for the MUZ register bridge and tree views.

use std::env;

use anyhow::Context;
use muz_workshop::bridge::{Register, ScriptedEngine, Snapshot, StateBridge};
use muz_workshop::config::Config;
use muz_workshop::tree::{source_tree, Label, SourceFile, TreeProvider};

/// Trace replayed when no trace file is configured.
const DEMO_TRACE: &str = include_str!("../demos/boot.toml");

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--sample-config") {
        print!("{}", Config::sample_config());
        return Ok(());
    }
    if args.iter().any(|a| a == "--tree") {
        print_tree(&demo_creatures());
        return Ok(());
    }
    if args.iter().any(|a| a == "--sources") {
        let tree = source_tree(&demo_sources()).context("Building source tree")?;
        print_tree(&tree);
        return Ok(());
    }

    // Command line overrides the config file
    let mut config = Config::get().clone();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--steps" | "-n" => {
                let value = iter.next().context("--steps needs a value")?;
                let steps = value
                    .parse::<u64>()
                    .with_context(|| format!("Invalid step count: {}", value))?;
                config.steps = Some(steps);
            }
            "--extended" | "-x" => config.extended_registers = Some(true),
            path if !path.starts_with('-') => config.trace_path = Some(path.to_string()),
            other => log::warn!("Ignoring unknown option {}", other),
        }
    }

    let engine = match config.trace_path() {
        Some(path) => ScriptedEngine::load(&path)
            .with_context(|| format!("Loading trace {}", path.display()))?,
        None => ScriptedEngine::from_toml(DEMO_TRACE).context("Parsing built-in demo trace")?,
    };

    run_registers(engine, &config);
    Ok(())
}

/// Step the engine and print one register row per step.
fn run_registers(engine: ScriptedEngine, config: &Config) {
    let regs: &[Register] = if config.extended_registers() {
        &Register::EXTENDED[..]
    } else {
        &Register::CORE[..]
    };
    let digits = config.hex_digits();

    let mut bridge = StateBridge::exclusive(engine);
    bridge.start();

    let mut previous = bridge.registers();
    println!("{}", format_row(0, &previous, None, regs, digits));

    for _ in 0..config.steps() {
        if let Err(fault) = bridge.step() {
            println!("Stopped: {}", fault);
            break;
        }
        let current = bridge.registers();
        println!(
            "{}",
            format_row(bridge.steps(), &current, Some(&previous), regs, digits)
        );
        previous = current;
    }

    println!();
    println!("Steps: {}  Status: {:?}", bridge.steps(), bridge.status());
}

/// One line of register values. Registers changed since `previous` get a `*`.
fn format_row(
    step: u64,
    snapshot: &Snapshot,
    previous: Option<&Snapshot>,
    regs: &[Register],
    digits: usize,
) -> String {
    let changed = previous.map(|p| snapshot.changed(p)).unwrap_or_default();
    let cells: Vec<String> = snapshot
        .values(regs)
        .map(|(reg, value)| {
            let mark = if changed.contains(&reg) { "*" } else { " " };
            format!("{}={:0width$X}{}", reg.name(), value, mark, width = digits)
        })
        .collect();
    format!("[{:4}] {}", step, cells.join(" "))
}

/// Print a forest as an indented outline.
fn print_tree<C: Label, L: Label>(tree: &TreeProvider<C, L>) {
    for (depth, node) in tree.walk() {
        let marker = if tree.is_expandable(node) { "+" } else { "-" };
        println!("{}{} {}", "  ".repeat(depth), marker, tree.label(node));
    }
}

fn demo_creatures() -> TreeProvider<&'static str, &'static str> {
    TreeProvider::from_mapping(vec![
        ("Animals", vec!["Cat", "Dog", "Horse"]),
        ("Birds", vec!["Eagle", "Hawk"]),
        ("Fish", vec!["Cod", "Mackerel", "Salmon", "Tilapia"]),
    ])
}

fn demo_sources() -> Vec<SourceFile> {
    vec![
        SourceFile::main("SCMonitor/Source", "!Main.asm"),
        SourceFile::included(0, 8, "SCMonitor/Source", "Config.asm"),
        SourceFile::included(0, 20, "SCMonitor/Source", "Monitor.asm"),
        SourceFile::included(2, 14, "SCMonitor/Source/Hardware", "Serial.asm"),
        SourceFile::included(2, 15, "SCMonitor/Source/Hardware", "ROMPaging.asm"),
        SourceFile::included(0, 31, "SCMonitor/Source", "Strings.asm"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_trace_parses() {
        let engine = ScriptedEngine::from_toml(DEMO_TRACE).unwrap();
        assert_eq!(engine.len(), 10);
    }

    #[test]
    fn test_format_row_marks_changes() {
        let before = Snapshot::default();
        let after = Snapshot { pc: 1, ..Default::default() };
        let row = format_row(1, &after, Some(&before), &Register::CORE[..2], 4);
        assert_eq!(row, "[   1] PC=0001* AF=0000 ");
    }

    #[test]
    fn test_format_row_width() {
        let snap = Snapshot { pc: 0x1234, ..Default::default() };
        let row = format_row(0, &snap, None, &[Register::Pc], 8);
        assert_eq!(row, "[   0] PC=00001234 ");
    }

    #[test]
    fn test_demo_sources_build() {
        let tree = source_tree(&demo_sources()).unwrap();
        assert_eq!(tree.root_count(), 1);
        assert_eq!(tree.walk().count(), 6);
    }
}
