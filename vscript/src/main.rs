use std::process::ExitCode;

use vscript_driver::{Argument, Parser};

fn main() -> ExitCode {
    let argument = Argument::parse();
    vscript_driver::run(argument)
}
