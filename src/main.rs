//! rfcoil: RF model of single-layer helical air-core coils

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rfcoil::{
    plating::parse_plating,
    prelude::*,
    unit::{parse_frequency_mhz, parse_length_mm},
};
use std::str::FromStr;
use tracing::{Level, info};

#[derive(Parser, Debug)]
#[command(name = "rfcoil")]
#[command(about = "RF inductance, Q and self-resonance of single-layer air-core coils")]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate one coil
    Calc {
        #[command(flatten)]
        coil: CoilArgs,

        /// Number of turns
        #[arg(short = 'N', long, default_value = "10")]
        turns: f64,

        /// Print the result record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find the number of turns for a target inductance
    Turns {
        #[command(flatten)]
        coil: CoilArgs,

        /// Target effective inductance in µH
        #[arg(short = 'L', long)]
        inductance: f64,

        /// Print the result record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sweep the coil length, solving for the target inductance at each step, as CSV
    Scan {
        #[command(flatten)]
        coil: CoilArgs,

        /// Target effective inductance in µH
        #[arg(short = 'L', long)]
        inductance: f64,

        /// First coil length (mm unless a unit is given)
        #[arg(long, value_parser = parse_length_mm)]
        length_start: f64,

        /// Last coil length
        #[arg(long, value_parser = parse_length_mm)]
        length_stop: f64,

        /// Length increment
        #[arg(long, value_parser = parse_length_mm)]
        length_step: f64,

        /// Unit of the wire length column (mm, cm, m, in, ft)
        #[arg(long, default_value = "mm", value_parser = LengthUnit::from_str)]
        unit: LengthUnit,
    },
}

#[derive(Args, Debug)]
struct CoilArgs {
    /// Mean coil diameter (mm unless a unit is given, e.g. 4in)
    #[arg(short = 'D', long, default_value = "400", value_parser = parse_length_mm)]
    diameter: f64,

    /// Coil length (mm unless a unit is given)
    #[arg(short = 'l', long, default_value = "200", value_parser = parse_length_mm)]
    length: f64,

    /// Wire diameter (mm unless a unit is given)
    #[arg(short = 'd', long, default_value = "4", value_parser = parse_length_mm)]
    wire: f64,

    /// Design frequency (MHz unless a unit is given, e.g. 7100kHz)
    #[arg(short = 'f', long, default_value = "10", value_parser = parse_frequency_mhz)]
    frequency: f64,

    /// Plating material, by name or table index
    #[arg(short = 'p', long, default_value = "annealed copper", value_parser = parse_plating)]
    plating: usize,
}

impl CoilArgs {
    fn geometry(&self) -> CoilGeometryBuilder {
        CoilGeometryBuilder::new()
            .diameter(self.diameter)
            .length(self.length)
            .wire_diameter(self.wire)
            .frequency(self.frequency)
            .plating(self.plating)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(result: &CoilResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}

fn calc(coil: &CoilArgs, turns: f64, json: bool) -> Result<()> {
    let model = CoilModel::new(coil.geometry().turns(turns).build());
    if json {
        return print_json(model.result());
    }
    print!("{}", summary(&model));
    Ok(())
}

fn turns(coil: &CoilArgs, target: f64, json: bool) -> Result<()> {
    let mut model = CoilModel::new(coil.geometry().build());
    let outcome = model.solve_for_inductance(target);
    if json {
        return print_json(model.result());
    }
    let solution = outcome.with_context(|| format!("No coil found for {} µH", target))?;
    println!(
        "# {:.3} turns give L_eff_s = {:.3} µH (f_res = {:.3} MHz, {} iterations)",
        solution.turns, solution.l_eff_s, solution.f_res, solution.iters
    );
    print!("{}", summary(&model));
    Ok(())
}

fn scan(coil: &CoilArgs, target: f64, start: f64, stop: f64, step: f64, unit: LengthUnit) -> Result<()> {
    if !(step > 0.0) || !(stop >= start) {
        anyhow::bail!("Length sweep needs start <= stop and a positive step");
    }
    let steps = ((stop - start) / step + 1e-9).floor() as usize;
    let base = coil.geometry().build();
    let tables = CoilTables::shared();
    info!(target, start, stop, step, "scanning coil length");

    let extra = [format!("length {} mm to {} mm in {} mm steps", start, stop, step)];
    print!("{}", csv_header(target, &base, &extra));
    println!("{}", csv_column_header(unit));
    for i in 0..=steps {
        let length = start + i as f64 * step;
        let geometry = CoilGeometry { length, ..base };
        let mut model = CoilModel::with_tables(geometry, tables.clone());
        // failures are part of the sweep; the record carries the code
        let _ = model.solve_for_inductance(target);
        println!("{}", csv_line(model.result(), unit));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Calc { coil, turns: n, json } => calc(coil, *n, *json),
        Command::Turns {
            coil,
            inductance,
            json,
        } => turns(coil, *inductance, *json),
        Command::Scan {
            coil,
            inductance,
            length_start,
            length_stop,
            length_step,
            unit,
        } => scan(coil, *inductance, *length_start, *length_stop, *length_step, *unit),
    }
}
