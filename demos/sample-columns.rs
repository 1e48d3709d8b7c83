extern crate vertexsampling;

use std::env;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use vertexsampling::read::columns;
use vertexsampling::{sample_columns, GeometryKind, SamplingConfig};

/// Reads X/Y columns from a file, samples them with an expression such as
/// `vertex_vw(n=500)` and writes the sampled columns to another file. The
/// rows are polygon rings unless the last argument says `path`.
fn main() {
    let mut args = env::args();

    if args.len() != 4 && args.len() != 5 {
        writeln!(&mut io::stderr(), "Usage: {} <IN_PATH> <EXPRESSION> <OUT_PATH> [polygon|path]", args.next().unwrap()).unwrap();
        process::exit(1);
    }

    args.next();
    let in_path = PathBuf::from(args.next().unwrap());
    let expression = args.next().unwrap();
    let out_path = PathBuf::from(args.next().unwrap());
    let geometry = args.next().unwrap_or_else(|| "polygon".to_string());

    let config = match (expression.parse::<SamplingConfig>(), geometry.parse::<GeometryKind>()) {
        (Err(err), _) | (_, Err(err)) => {
            writeln!(&mut io::stderr(), "{}", err).unwrap();
            process::exit(1);
        }
        (Ok(config), Ok(geometry)) => config.with_geometry(geometry),
    };

    match columns::open(&in_path) {
        Err(err) => {
            writeln!(&mut io::stderr(), "Error during read: {}", err).unwrap();
            process::exit(1);
        }
        Ok(input) => {
            let sampled = sample_columns(&input, &config);

            if let Err(err) = columns::create(&out_path, &sampled.value) {
                writeln!(&mut io::stderr(), "Error during write: {}", err).unwrap();
                process::exit(1);
            }

            if let Some(message) = sampled.message {
                println!("{}", message);
            }
            println!("Wrote {} of {} rows", sampled.value.len(), input.len());
        }
    }
}
