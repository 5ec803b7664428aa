// Payline preview CLI.
//
// Usage:
//   payline-preview render <config.json> [-o <output.svg>] [--seed <n>] [--hide] [--outlines]
//   payline-preview cells <config.json> [--seed <n>] [--hide]
//   payline-preview defaults

use std::path::Path;
use std::process;

use payline::selection::{log_selection, randomize_visibility, SelectionEvents};
use payline::{Grid, PaylineSet, SlotConfig};
use payline_preview::{describe_cells, SvgScene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "render" => cmd_render(&args[2..]),
        "cells" => cmd_cells(&args[2..]),
        "defaults" => cmd_defaults(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("payline-preview - render payline layouts to SVG");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  render <config.json> [-o <output.svg>] [--seed <n>] [--hide] [--outlines]");
    eprintln!("      Generate random paylines over the configured grid and save them as SVG.");
    eprintln!("      --hide randomizes cell visibility, --outlines draws cell borders.");
    eprintln!();
    eprintln!("  cells <config.json> [--seed <n>] [--hide]");
    eprintln!("      List every cell with its center and padded border.");
    eprintln!();
    eprintln!("  defaults");
    eprintln!("      Print the default configuration as JSON.");
}

struct Options {
    config: SlotConfig,
    output: Option<String>,
    seed: Option<u64>,
    hide: bool,
    outlines: bool,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{}", msg);
    process::exit(1);
}

fn parse_options(usage: &str, args: &[String]) -> Options {
    if args.is_empty() {
        fail(format!("Usage: payline-preview {}", usage));
    }

    let config = SlotConfig::load(&args[0])
        .unwrap_or_else(|e| fail(format!("Failed to load {}: {}", args[0], e)));
    let mut opts = Options {
        seed: config.seed,
        config,
        output: None,
        hide: false,
        outlines: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-o" if i + 1 < args.len() => {
                opts.output = Some(args[i + 1].clone());
                i += 2;
            }
            "--seed" if i + 1 < args.len() => {
                let seed = args[i + 1]
                    .parse()
                    .unwrap_or_else(|_| fail(format!("Invalid seed: {}", args[i + 1])));
                opts.seed = Some(seed);
                i += 2;
            }
            "--hide" => {
                opts.hide = true;
                i += 1;
            }
            "--outlines" => {
                opts.outlines = true;
                i += 1;
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                i += 1;
            }
        }
    }
    opts
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Configured grid, with visibility randomized when asked for.
fn layout(opts: &Options, rng: &mut StdRng) -> Grid {
    let grid = opts
        .config
        .build_grid()
        .unwrap_or_else(|e| fail(format!("Invalid grid: {}", e)));
    if !opts.hide {
        return grid;
    }
    randomize_visibility(&grid, opts.config.visibility_probability, rng)
        .unwrap_or_else(|e| fail(format!("Invalid visibility: {}", e)))
}

fn cmd_render(args: &[String]) {
    let opts = parse_options(
        "render <config.json> [-o <output.svg>] [--seed <n>] [--hide] [--outlines]",
        args,
    );
    let mut rng = rng_for(opts.seed);
    let grid = layout(&opts, &mut rng);

    let generator = opts
        .config
        .combinations
        .generator()
        .unwrap_or_else(|e| fail(format!("Invalid combinations: {}", e)));
    let mut paylines = generator
        .generate(&grid, opts.hide, &mut rng)
        .unwrap_or_else(|e| fail(format!("Selection failed: {}", e)));
    if let Some(order) = opts.config.line.draw_order {
        for line in &mut paylines {
            let style = line.style().with_draw_order(order);
            line.set_style(style);
        }
    }

    let mut events = SelectionEvents::new();
    events.subscribe(log_selection);
    for line in &paylines {
        events.notify(line.cells());
    }

    let mut scene = SvgScene::new(grid.bounds());
    if opts.outlines {
        scene.add_outlines(&grid);
    }
    let mut set = PaylineSet::new();
    set.rebuild(&mut scene, paylines)
        .unwrap_or_else(|e| fail(format!("Payline build failed: {}", e)));

    let output = opts.output.unwrap_or_else(|| "paylines.svg".to_string());
    scene
        .save(Path::new(&output))
        .unwrap_or_else(|e| fail(format!("Failed to save {}: {}", output, e)));
    println!("Saved {} paylines: {}", set.len(), output);
    set.clear(&mut scene);
}

fn cmd_cells(args: &[String]) {
    let opts = parse_options("cells <config.json> [--seed <n>] [--hide]", args);
    let mut rng = rng_for(opts.seed);
    let grid = layout(&opts, &mut rng);
    print!("{}", describe_cells(&grid));
}

fn cmd_defaults() {
    let text = SlotConfig::default()
        .to_json_pretty()
        .unwrap_or_else(|e| fail(e));
    println!("{}", text);
}
