use anyhow::Context;
use clap::{Arg, Command};
use component_inference::classifiers::builtin_damping_factors;
use component_inference::{
    collect_candidates, CancellationFlag, ComponentEngine, ComponentType, EngineConfig, Node,
};
use log::LevelFilter;
use serde::Serialize;
use std::io::Read;
use std::process;

fn main() {
    let matches = Command::new("component-inference")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Classify design-tree nodes as UI components and map their slots")
        .long_about(
            "Reads a design node tree as JSON, classifies nodes against the built-in\n\
             component catalog and maps each classified node's children onto the\n\
             component's slot schema. Results are written to stdout as JSON.",
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Node tree as JSON, or '-' for stdin")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Engine configuration file (YAML)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Write the default configuration to FILE and exit")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("all")
                .short('a')
                .long("all")
                .help("Analyze every named frame and instance in the tree, not just the root")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("min-confidence")
                .long("min-confidence")
                .value_name("X")
                .help("Override the minimum classification confidence")
                .value_parser(clap::value_parser!(f64))
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("list-types")
                .long("list-types")
                .help("List component types with their tie-break priority and slots")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .help("Pretty-print JSON output")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with per-rule scoring detail")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Initialize logger based on verbose flag
    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    if let Err(e) = run(&matches) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> anyhow::Result<()> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(min_confidence) = matches.get_one::<f64>("min-confidence") {
        config.classification.min_confidence = *min_confidence;
    }

    let engine = ComponentEngine::new(config).context("Failed to build component engine")?;

    if matches.get_flag("list-types") {
        list_types(&engine)?;
        return Ok(());
    }

    let input = matches
        .get_one::<String>("input")
        .context("No input given; pass --input FILE or --input -")?;
    let root = read_tree(input)?;
    let pretty = matches.get_flag("pretty");

    if matches.get_flag("all") {
        let cancel = CancellationFlag::new();
        let handler_flag = cancel.clone();
        ctrlc::set_handler(move || {
            log::info!("Received interrupt, finishing analyses already in progress...");
            handler_flag.cancel();
        })
        .context("Error setting signal handler")?;

        let nodes = collect_candidates(&root);
        log::info!("Found {} candidate node(s) in '{}'", nodes.len(), root.name);
        let report = engine.analyze_batch(&nodes, &cancel)?;
        print_json(&report, pretty)?;
    } else {
        let analysis = engine.analyze(&root)?;
        print_json(&analysis, pretty)?;
    }
    Ok(())
}

fn load_config(path: &str) -> anyhow::Result<EngineConfig> {
    if std::path::Path::new(path).exists() {
        Ok(EngineConfig::load_from_file(path)?)
    } else {
        log::warn!("Configuration file '{path}' not found, using default configuration");
        Ok(EngineConfig::default())
    }
}

fn generate_default_config(path: &str) {
    let mut config = EngineConfig::default();
    config.suppression.damping = builtin_damping_factors();
    let written = config
        .to_yaml_string()
        .map_err(anyhow::Error::from)
        .and_then(|yaml| std::fs::write(path, yaml).map_err(anyhow::Error::from));
    match written {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e}");
            process::exit(1);
        }
    }
}

fn read_tree(input: &str) -> anyhow::Result<Node> {
    let content = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read node tree from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read node tree from '{input}'"))?
    };
    serde_json::from_str(&content).context("Failed to parse node tree JSON")
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn list_types(engine: &ComponentEngine) -> anyhow::Result<()> {
    println!("Component types ({}), in tie-break priority order:", ComponentType::ALL.len());
    println!();
    let mut types = ComponentType::ALL.to_vec();
    types.sort_by_key(|t| t.priority());
    for component in types {
        let schema = engine.schemas().get_schema(component)?;
        let slots: Vec<String> = schema
            .outline()
            .iter()
            .map(|slot| {
                let mut label = slot.name.clone();
                if slot.allows_multiple {
                    label.push_str("[]");
                }
                if !slot.required {
                    label.push('?');
                }
                label
            })
            .collect();
        println!(
            "  {:>2}. {:<16} {}",
            component.priority() + 1,
            component.as_str(),
            if slots.is_empty() {
                "(no slots)".to_string()
            } else {
                slots.join(", ")
            }
        );
    }
    Ok(())
}
