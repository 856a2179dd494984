use std::fmt::Display;

pub fn exit_with_error<T: Display>(err: T, code: i32) -> ! {
    eprintln!("{}", err);
    std::process::exit(code)
}
