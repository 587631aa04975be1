use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use styletree_lib::{decode_batch, encode, Document, EncodeOptions, Error};

const STYLETREE_INTRO: &str = r#"
       _         _      _
   ___| |_ _   _| | ___| |_ _ __ ___  ___
  / __| __| | | | |/ _ \ __| '__/ _ \/ _ \
  \__ \ |_| |_| | |  __/ |_| | |  __/  __/
  |___/\__|\__, |_|\___|\__|_|  \___|\___|
           |___/

  Convert CSS into an ordered JSON rule tree, and back again.
"#;

#[derive(Parser)]
#[command(name = "styletree")]
#[command(about = "Convert CSS to an ordered JSON rule tree and back")]
#[command(long_about = STYLETREE_INTRO)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode stylesheets into JSON rule trees.
    Decode {
        /// Input stylesheets. `-` reads stdin.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Print compact JSON.
        #[arg(long)]
        compact: bool,
    },
    /// Encode a JSON rule tree as CSS.
    Encode {
        /// Input JSON file. `-` reads stdin.
        input: PathBuf,

        /// Indentation unit.
        #[arg(long, default_value = "  ")]
        indent: String,
    },
}

fn main() {
    env_logger::init();

    // parse the args given in terminal
    let args: Args = Args::parse();

    let result = match args.command {
        Command::Decode { inputs, compact } => run_decode(&inputs, compact),
        Command::Encode { input, indent } => run_encode(&input, indent),
    };
    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_input(path: &Path) -> Result<String, Error> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| Error::io(path, e))?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

fn run_decode(inputs: &[PathBuf], compact: bool) -> Result<String, Error> {
    let sources = inputs
        .iter()
        .map(|path| read_input(path))
        .collect::<Result<Vec<_>, _>>()?;
    let documents = decode_batch(&sources)
        .into_iter()
        .collect::<Result<Vec<Document>, _>>()?;
    log::info!("Decoded {} stylesheet(s)", documents.len());

    let json = match documents.as_slice() {
        [document] => serde_json::to_value(document)?,
        _ => {
            let mut by_path = serde_json::Map::new();
            for (path, document) in inputs.iter().zip(&documents) {
                by_path.insert(path.display().to_string(), serde_json::to_value(document)?);
            }
            serde_json::Value::Object(by_path)
        }
    };
    let mut output = if compact {
        serde_json::to_string(&json)?
    } else {
        serde_json::to_string_pretty(&json)?
    };
    output.push('\n');
    Ok(output)
}

fn run_encode(input: &Path, indent: String) -> Result<String, Error> {
    let document: Document = serde_json::from_str(&read_input(input)?)?;
    Ok(encode(&document, &EncodeOptions::with_indent(indent))?)
}
