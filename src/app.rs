use std::io::{BufWriter, stdin, stdout};
use std::path::PathBuf;

use crate::common::error::AppError;
use crate::io::store_file;
use crate::session::processor::Processor;
use crate::session::shell::Shell;

const DEFAULT_STORE_PATH: &str = "accounts.json";

pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    let store_path = PathBuf::from(
        args.get(1)
            .map(String::as_str)
            .unwrap_or(DEFAULT_STORE_PATH),
    );

    let mut store = store_file::load(&store_path)?;

    let stdin = stdin();
    let stdout = stdout();
    let mut shell = Shell::new(
        stdin.lock(),
        BufWriter::new(stdout.lock()),
        store_path,
    );
    let mut processor = Processor::new();

    shell.run(&mut store, &mut processor)
}
