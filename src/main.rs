use std::{env, io, process};

use rlox_lang::{Command, Lox};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: rlox <tokenize|parse|evaluate|run> <path>");
        process::exit(1);
    }

    let Ok(command) = args[1].parse::<Command>() else {
        eprintln!("Unknown command: {}", args[1]);
        process::exit(64);
    };

    let mut stdout = io::stdout();
    let mut lox = Lox::new(&mut stdout);
    lox.run_file(command, &args[2]);
}
