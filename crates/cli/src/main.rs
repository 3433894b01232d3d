use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use named_params::{
    mesh, ops, Applicator, ApplyCfg, NamedParameters, ParamDict, ParamOp, UnknownKeyPolicy,
};
use serde_json::json;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod demo;
mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Apply named-parameter dictionaries to geometry configurations")]
struct Cmd {
    /// Raise log level (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Fold a dictionary into a configuration and print it as JSON
    Apply {
        /// JSON object, or @path to a JSON file
        #[arg(long, default_value = "{}")]
        params: String,
        /// Operator keys in application order (default: all standard operators)
        #[arg(long = "op")]
        ops: Vec<String>,
        /// What to do with keys no operator consumes
        #[arg(long, default_value_t = UnknownKeyPolicy::Ignore)]
        unknown: UnknownKeyPolicy,
        /// Also write the result here, plus a provenance sidecar
        #[arg(long)]
        out: Option<String>,
    },
    /// Run the trace scenarios and log each parameter chain
    Demo,
    /// Summarize mesh processing under the given parameters
    ProcessMesh {
        #[arg(long)]
        name: String,
        #[arg(long)]
        vertices: usize,
        /// JSON object, or @path to a JSON file
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Apply {
            params,
            ops,
            unknown,
            out,
        } => {
            let doc = apply(&params, &ops, unknown, out.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(())
        }
        Action::Demo => run_demo(),
        Action::ProcessMesh {
            name,
            vertices,
            params,
        } => {
            let dict = load_params(&params)?;
            let np = Applicator::new(ops::standard())
                .apply(NamedParameters::default_values(), &dict)?;
            println!("{}", mesh::process_mesh(&name, vertices, &np));
            Ok(())
        }
        Action::Report => report(),
    }
}

/// Inline JSON, or `@path` to read it from a file.
fn load_params(arg: &str) -> Result<ParamDict> {
    let text = match arg.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading params file {path}"))?
        }
        None => arg.to_string(),
    };
    ParamDict::from_json_str(&text).context("params must be a JSON object")
}

fn resolve_ops(names: &[String]) -> Result<Vec<ParamOp<NamedParameters>>> {
    if names.is_empty() {
        return Ok(ops::standard());
    }
    names
        .iter()
        .map(|name| {
            ops::by_name(name).with_context(|| {
                format!(
                    "unknown operator '{name}', expected one of {:?}",
                    ops::STANDARD_KEYS
                )
            })
        })
        .collect()
}

fn apply(
    params: &str,
    op_names: &[String],
    unknown: UnknownKeyPolicy,
    out: Option<&str>,
) -> Result<serde_json::Value> {
    let dict = load_params(params)?;
    let ops = resolve_ops(op_names)?;
    let op_keys: Vec<String> = ops.iter().map(|op| op.key().to_string()).collect();
    tracing::info!(entries = dict.len(), ops = ?op_keys, %unknown, "apply");

    let (np, report) = Applicator::new(ops)
        .with_cfg(ApplyCfg::with_unknown(unknown))
        .apply_with_report(NamedParameters::default_values(), &dict)?;
    let doc = json!({
        "chain": np.chain(),
        "config": np,
        "matched": report.matched,
        "unknown": report.unknown,
        "policy": unknown,
    });

    if let Some(out) = out {
        let out_path = Path::new(out);
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(out_path, serde_json::to_vec_pretty(&doc)?)
            .with_context(|| format!("writing {out}"))?;
        let payload = provenance::Payload::new(serde_json::to_value(&dict)?)
            .with_ops(op_keys)
            .with_policy(unknown);
        let prov = provenance::write_sidecar(out_path, payload)?;
        tracing::info!(out, provenance = %prov.display(), "wrote result");
    }
    Ok(doc)
}

fn run_demo() -> Result<()> {
    for scenario in demo::scenarios() {
        let outcome = demo::run(&scenario)?;
        println!("{}: {}", outcome.title, outcome.chain);
    }
    Ok(())
}

fn report() -> Result<()> {
    let obj = provenance::block(json!({ "standard_ops": ops::STANDARD_KEYS }), Vec::new());
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
