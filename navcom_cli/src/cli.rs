use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use navcom::{constants::DEFAULT_DEVICE_PATH, IntegrityPolicy, SessionConfig};

pub fn parse_args() -> Command {
    Command::new("navcom-cli")
        .author(clap::crate_authors!())
        .about("Polls a NavCom SF-3050 receiver and prints what it answers")
        .arg(
            Arg::new("device")
                .value_name("path")
                .short('d')
                .long("device")
                .default_value(DEFAULT_DEVICE_PATH)
                .help("Character device exposed by the receiver's kernel driver"),
        )
        .arg(
            Arg::new("serial")
                .value_name("port")
                .short('p')
                .long("serial")
                .conflicts_with("device")
                .help("Serial port to open instead of the character device"),
        )
        .arg(
            Arg::new("baud")
                .value_name("baud")
                .short('s')
                .long("baud")
                .requires("serial")
                .default_value("115200")
                .value_parser(value_parser!(u32))
                .help("Baud rate of the serial port"),
        )
        .arg(
            Arg::new("command")
                .value_name("command")
                .short('c')
                .long("command")
                .default_value("[PVT1B]")
                .help("Command sent before every read, must start with '['"),
        )
        .arg(
            Arg::new("count")
                .value_name("count")
                .short('n')
                .long("count")
                .default_value("1")
                .value_parser(value_parser!(u64))
                .help("Number of command/response rounds, 0 polls until interrupted"),
        )
        .arg(
            Arg::new("integrity")
                .long("integrity")
                .default_value("discard")
                .value_parser(["discard", "flag", "ignore"])
                .help("What to do with a message whose checksum does not match"),
        )
        .arg(
            Arg::new("chunk-size")
                .value_name("bytes")
                .long("chunk-size")
                .value_parser(value_parser!(usize))
                .help("Upper bound of a single read"),
        )
        .arg(
            Arg::new("buffer-capacity")
                .value_name("bytes")
                .long("buffer-capacity")
                .value_parser(value_parser!(usize))
                .help("Size of the receive buffer"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print one JSON object per message"),
        )
}

pub fn session_config(matches: &ArgMatches) -> SessionConfig {
    let mut config = SessionConfig::default();
    if let Some(chunk_size) = matches.get_one::<usize>("chunk-size") {
        config = config.with_chunk_size(*chunk_size);
    }
    if let Some(capacity) = matches.get_one::<usize>("buffer-capacity") {
        config = config.with_buffer_capacity(*capacity);
    }
    let integrity = match matches.get_one::<String>("integrity").map(String::as_str) {
        Some("flag") => IntegrityPolicy::Flag,
        Some("ignore") => IntegrityPolicy::Ignore,
        _ => IntegrityPolicy::Discard,
    };
    config.with_integrity(integrity)
}
