#[derive(Debug, Clone, PartialEq, Eq, structopt::StructOpt)]
#[structopt(name = "hdlc", about = "encode and decode HDLC UI frames")]
pub struct Options {
    #[structopt(long, help = "multi-line log output")]
    pub pretty: bool,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, structopt::StructOpt)]
pub enum Command {
    #[structopt(about = "decode frames from stdin (default raw binary format)")]
    Decode {
        #[structopt(
            long,
            help = "interpret stdin as hex (can be space and/or newline separated, does not strip 0x)"
        )]
        hex: bool,

        #[structopt(long, conflicts_with = "hex", help = "interpret stdin as base64")]
        base64: bool,

        #[structopt(long, help = "print only valid frames; invalid frames are logged")]
        valid_only: bool,
    },

    #[structopt(about = "encode a UI frame and write it to stdout as hex")]
    Encode {
        #[structopt(short, long, default_value = "0")]
        address: u64,

        #[structopt(long, help = "write raw bytes instead of hex")]
        raw: bool,

        #[structopt(help = "payload as hex", default_value = "")]
        payload: String,
    },
}
