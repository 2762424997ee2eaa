use crate::utils::config::{ConfigurationRecord, FIELDS};
use chrono::prelude::*;
use simplelog::*;
use std::fs::File;
use std::io::{self, stdin, stdout, BufRead, Write};

pub fn init_logging(command: &str, log_file: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if log_file {
        let dt = Local::now();
        loggers.push(WriteLogger::new(
            LevelFilter::Info,
            Config::default(),
            File::create(format!(
                "subnetwall_{}_{}.log",
                command,
                dt.format("%Y_%m_%d_%H_%M_%S")
            ))?,
        ));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

pub fn print_config(record: &ConfigurationRecord) {
    for (field, _) in FIELDS {
        println!("{:>20}: {}", field, record.get(field).unwrap_or_default());
    }
}

pub fn verify_config(record: &ConfigurationRecord) -> io::Result<bool> {
    print_config(record);
    yes_no("Config Ok", &mut stdin().lock())
}

pub fn yes_no<R: BufRead>(question: &str, input: &mut R) -> io::Result<bool> {
    loop {
        print!("{} (y/n)? ", question);
        let _ = stdout().flush();
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF, nobody is there to answer
            return Ok(false);
        }
        match line.trim().to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn yes_no_reads_first_letter() {
        assert!(yes_no("q", &mut Cursor::new("Yes\n")).unwrap());
        assert!(!yes_no("q", &mut Cursor::new("nope\n")).unwrap());
    }

    #[test]
    fn yes_no_reprompts_on_junk() {
        assert!(yes_no("q", &mut Cursor::new("maybe\n\ny\n")).unwrap());
    }

    #[test]
    fn yes_no_eof_is_no() {
        assert!(!yes_no("q", &mut Cursor::new("")).unwrap());
    }
}
