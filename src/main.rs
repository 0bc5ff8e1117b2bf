mod config;
mod console;

use std::io::Write;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

use subcalc::calculate;
use subcalc::report::{Report, LABEL_WIDTH};

use crate::config::Config;
use crate::console::{Color, ewrite_in_color, write_in_color};


const LABEL_COLOR: Color = Color::White;
const VALUE_COLOR: Color = Color::Blue;
const SECTION_COLOR: Color = Color::DarkYellow;
const SUBNET_COLOR: Color = Color::Green;
const ERROR_COLOR: Color = Color::Red;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} - {l} - {m}{n}";


fn usage() {
    eprintln!("Usage: subcalc ADDRESS MASK [NEWPREFIX]");
    eprintln!("       subcalc -l|--list ADDRESS MASK NEWPREFIX [LIMIT]");
    eprintln!("       subcalc -h|--help");
    eprintln!();
    eprintln!("MASK is one of: CIDRPREFIX (24 or /24)");
    eprintln!("                SUBNETMASK (255.255.255.0)");
    eprintln!("                WILDCARD (0.0.0.255)");
    eprintln!();
    eprintln!("NEWPREFIX splits the network into subnets with that CIDR prefix.");
    eprintln!();
    eprintln!("Environment: SUBCALC_LOG (off, error, warn, info, debug, trace)");
    eprintln!(
        "             SUBCALC_PREVIEW (number of subnets listed, default {}, at most {})",
        config::DEFAULT_PREVIEW_LIMIT, config::MAX_PREVIEW_LIMIT,
    );
    eprintln!("             NO_COLOR (disables colors)");
}

fn init_logging(level: LevelFilter) {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let log_config = log4rs::config::Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level));

    let result = match log_config {
        Ok(c) => log4rs::init_config(c).map(|_| ()).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    if let Err(e) = result {
        eprintln!("failed to set up logging: {}", e);
    }
}

fn output_error<E: std::error::Error>(error: &E, reason: &str) {
    ewrite_in_color("error:", Some(ERROR_COLOR), 0);
    eprintln!(" {} ({})", error, reason);
}

fn output_report(report: &Report) {
    for field in report {
        if field.is_section() {
            println!();
            write_in_color(&field.label, Some(SECTION_COLOR), 0);
            println!();
            continue;
        }

        write_in_color(&field.label, Some(LABEL_COLOR), LABEL_WIDTH);
        print!(": ");
        let color = if field.label.starts_with("Subnet ") { SUBNET_COLOR } else { VALUE_COLOR };
        write_in_color(&field.value, Some(color), 0);
        println!();
    }
}

fn show(args: &[String], config: &Config) -> i32 {
    if args.len() < 2 || args.len() > 3 {
        usage();
        return 1;
    }

    let child_prefix = args.get(2).map(|s| s.as_str());
    match calculate(&args[0], &args[1], child_prefix) {
        Ok(calc) => {
            output_report(&calc.report(config.preview_limit));
            0
        },
        Err(e) => {
            output_error(&e, e.kind().reason());
            1
        },
    }
}

fn list(args: &[String]) -> i32 {
    if args.len() < 3 || args.len() > 4 {
        usage();
        return 1;
    }

    let limit: Option<usize> = match args.get(3) {
        Some(l) => match l.parse() {
            Ok(n) => Some(n),
            Err(_) => {
                eprintln!("invalid LIMIT {:?}", l);
                usage();
                return 1;
            },
        },
        None => None,
    };

    let calc = match calculate(&args[0], &args[1], Some(args[2].as_str())) {
        Ok(c) => c,
        Err(e) => {
            output_error(&e, e.kind().reason());
            return 1;
        },
    };
    let plan = match calc.subnets {
        Some(p) => p,
        None => {
            usage();
            return 1;
        },
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let cidrs = plan.cidrs().take(limit.unwrap_or(usize::MAX));
    for cidr in cidrs {
        if writeln!(out, "{}", cidr).is_err() {
            // reader went away
            break;
        }
    }
    0
}

fn do_main() -> i32 {
    let args: Vec<String> = std::env::args().collect();

    let config = Config::from_env();
    init_logging(config.log_level);
    for warning in &config.warnings {
        log::warn!("{}", warning);
    }
    if !config.color {
        crate::console::disable_colors();
    }

    if args.len() < 2 {
        usage();
        return 1;
    }

    if args[1] == "-h" || args[1] == "--help" {
        usage();
        0
    } else if args[1] == "-l" || args[1] == "--list" {
        list(&args[2..])
    } else {
        show(&args[1..], &config)
    }
}

fn main() {
    std::process::exit(do_main());
}
