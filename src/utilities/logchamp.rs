//! joe: logchamp
//! joe: call it logchamp
//! joe: please

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use colored::{Color, Colorize};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::macros;

const FILENAME: &str = ".log";

pub enum InitError {
    File(io::Error),
    AlreadySet(SetLoggerError),
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(err) => write!(f, "cannot open the log file: {err}"),
            Self::AlreadySet(err) => write!(f, "{err}"),
        }
    }
}

struct Logger {
    file: Mutex<BufWriter<File>>,
}

impl Logger {
    fn new(path: &Path) -> io::Result<Self> {
        log::set_max_level(LevelFilter::Debug);
        Ok(Self { file: Mutex::new(BufWriter::new(File::create(path)?)) })
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match metadata.target().split("::").next() {
            Some("fim_requester") => true,
            _ => metadata.level() <= Level::Info,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let Ok(timestamp) = time::OffsetDateTime::now_utc()
            .format(macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        else {
            return;
        };
        let target = record.target();
        let level = record.level().as_str();
        let args = record.args();

        let color = match record.level() {
            Level::Error => Color::BrightRed,
            Level::Warn => Color::BrightYellow,
            Level::Info => Color::BrightCyan,
            Level::Debug => Color::Magenta,
            Level::Trace => Color::Green,
        };

        // stdout belongs to the completion text
        eprintln!("{} {} {args}", timestamp.color(Color::BrightBlack), level.color(color));

        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "{timestamp} [{target} {level}] {args}").ok();
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            file.flush().ok();
        }
    }
}

pub fn init() -> Result<(), InitError> {
    let logger = Logger::new(Path::new(FILENAME)).map_err(InitError::File)?;
    log::set_boxed_logger(Box::new(logger)).map_err(InitError::AlreadySet)
}
