use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

fn usage() -> &'static str {
    "usage: vela <source-file>"
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let path = match args.next() {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("{}", usage());
            return ExitCode::from(2);
        }
    };

    let out = Rc::new(RefCell::new(io::stdout()));
    if let Err(e) = vela_drv::run_file(&path, out) {
        eprintln!("error: {e}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
