mod emit;
mod lib;
mod load;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

fn main() {
    let matches = App::new("rxlist")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile pharmacy price lists into interactive offer documents")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("build")
                .about("Compile a data file into an offer document")
                .arg(
                    Arg::with_name("data")
                        .help("price-list data file ('Name----- value' lines)")
                        .required(true),
                )
                .arg(
                    Arg::with_name("template")
                        .help("offer document template")
                        .required(true),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .help("where to write the document (defaults to the template path)"),
                )
                .arg(
                    Arg::with_name("sorted")
                        .long("sorted")
                        .help("sort alphabetically and insert section headers"),
                )
                .arg(
                    Arg::with_name("list-no")
                        .long("list-no")
                        .takes_value(true)
                        .help("list number (sorted mode)"),
                )
                .arg(
                    Arg::with_name("date")
                        .long("date")
                        .takes_value(true)
                        .help("list date dd/mm/yyyy, defaults to today (sorted mode)"),
                )
                .arg(
                    Arg::with_name("title")
                        .long("title")
                        .takes_value(true)
                        .help("document title (sorted mode)"),
                )
                .arg(
                    Arg::with_name("whatsapp")
                        .long("whatsapp")
                        .takes_value(true)
                        .help("WhatsApp contact number (sorted mode)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("extract")
                .about("Recover a data file from a legacy offer document")
                .arg(
                    Arg::with_name("document")
                        .help("legacy offer document")
                        .required(true),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .help("where to write the data file"),
                )
                .arg(
                    Arg::with_name("decrease")
                        .long("decrease")
                        .takes_value(true)
                        .help("subtract this amount from every rate"),
                )
                .arg(
                    Arg::with_name("separator")
                        .long("separator")
                        .takes_value(true)
                        .default_value(",")
                        .help("separator appended to each emitted value"),
                )
                .arg(
                    Arg::with_name("stock")
                        .long("stock")
                        .help("stock-format document (name in the third cell)"),
                ),
        )
        .get_matches();

    let code = match matches.subcommand() {
        ("build", Some(args)) => build(args),
        ("extract", Some(args)) => extract(args),
        _ => unreachable!(),
    };
    std::process::exit(code);
}

fn build(args: &ArgMatches) -> i32 {
    let data = args.value_of("data").unwrap();
    let template_path = args.value_of("template").unwrap();
    let output = args.value_of("output").unwrap_or(template_path);

    let mut errs = load::error::Record::new();
    let entries = load::read_entries(data, &mut errs);
    let template = load::read_document(template_path, &mut errs);
    print!("{}", errs);
    let (entries, template) = match (entries, template) {
        (Some(entries), Some(template)) => (entries, template),
        _ => return 1,
    };

    let result = if args.is_present("sorted") {
        let mut meta = emit::ListMeta::default();
        if let Some(no) = args.value_of("list-no") {
            meta.list_no = no.to_string();
        }
        if let Some(date) = args.value_of("date") {
            meta.list_date = date.to_string();
        }
        if let Some(title) = args.value_of("title") {
            meta.title = title.to_string();
        }
        if let Some(number) = args.value_of("whatsapp") {
            meta.whatsapp = number.chars().filter(|c| c.is_ascii_digit()).collect();
        }
        emit::compile_sorted(&entries, &template, &meta)
    } else {
        emit::compile_ordered(&entries, &template)
    };

    match result {
        Ok(document) => match std::fs::write(output, document) {
            Ok(()) => {
                println!("Generated {} items into '{}'", entries.len(), output);
                0
            }
            Err(e) => {
                eprintln!("Cannot write '{}': {}", output, e);
                1
            }
        },
        Err(e) => {
            let mut errs = load::error::Record::new();
            errs.make("Template patching failed")
                .text(format!("{}", e))
                .hint(e.fix_hint());
            print!("{}", errs);
            1
        }
    }
}

fn extract(args: &ArgMatches) -> i32 {
    let path = args.value_of("document").unwrap();

    let mut errs = load::error::Record::new();
    let document = load::read_document(path, &mut errs);
    print!("{}", errs);
    let document = match document {
        Some(document) => document,
        None => return 1,
    };

    let opts = load::extract::Options {
        decrease: args
            .value_of("decrease")
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0),
        stock: args.is_present("stock"),
    };
    let items = load::extract::scan(&document, &opts);
    let text = load::extract::to_lines(&items, args.value_of("separator").unwrap_or(","));

    let output = match args.value_of("output") {
        Some(output) => output.to_string(),
        None => derived_output(path),
    };
    match std::fs::write(&output, text) {
        Ok(()) => {
            println!("Extracted {} items into '{}'", items.len(), output);
            0
        }
        Err(e) => {
            eprintln!("Cannot write '{}': {}", output, e);
            1
        }
    }
}

/// Output name the legacy batch tool used: `LIST.HTM` -> `LIST_name_with_%.txt`
fn derived_output(path: &str) -> String {
    let stem = std::path::Path::new(path).with_extension("");
    format!("{}_name_with_%.txt", stem.display())
}
