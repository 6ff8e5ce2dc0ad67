use std::io::{
    self,
    Read,
    Write,
};

use base64::Engine;
use futures::StreamExt;
use structopt::StructOpt;
use tokio_util::codec::FramedRead;

use hdlc_link::{
    build,
    build_frame,
    describe,
    trace,
    FrameDecoder,
    HdlcCodec,
};

mod options;

pub use options::{
    Command,
    Options,
};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    util::bootstrap!(
        "starting {} {} ({}, built at {} with rustc {})",
        build::PACKAGE,
        build::VERSION,
        build::COMMIT_HASH,
        build::BUILD_TIMESTAMP,
        build::RUSTC_COMMIT_HASH,
    );

    let options = Options::from_args();
    trace::init(options.pretty)?;

    tracing::debug!(?options, "tracing subsystem initialized");

    match options.command {
        Command::Decode {
            hex: false,
            base64: false,
            valid_only,
        } => decode_stream(valid_only).await,

        Command::Decode {
            hex: from_hex,
            valid_only,
            ..
        } => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s)?;

            let buf = if from_hex {
                hex::decode(s.trim().replace(&[' ', '\t', '\n', '\r'][..], ""))?
            } else {
                base64::engine::general_purpose::STANDARD.decode(s.trim())?
            };

            decode_buffer(&buf, valid_only)
        },

        Command::Encode {
            address,
            raw,
            payload,
        } => {
            let payload = hex::decode(payload.trim())?;
            let frame = build_frame(address, payload);

            let mut stdout = io::stdout().lock();
            if raw {
                stdout.write_all(&frame)?;
            } else {
                writeln!(stdout, "{}", hex::encode(&frame))?;
            }
            stdout.flush()?;

            Ok(())
        },
    }
}

async fn decode_stream(valid_only: bool) -> eyre::Result<()> {
    let codec = if valid_only {
        HdlcCodec::valid_only()
    } else {
        HdlcCodec::new()
    };

    let mut frames = FramedRead::new(tokio::io::stdin(), codec);
    let mut count = 0usize;

    while let Some(frame) = frames.next().await {
        println!("{}", describe(&frame?));
        count += 1;
    }

    tracing::info!(count, "end of input");

    Ok(())
}

fn decode_buffer(buf: &[u8], valid_only: bool) -> eyre::Result<()> {
    let mut decoder = FrameDecoder::new();
    let mut stdout = io::stdout().lock();

    if valid_only {
        for frame in decoder.process_valid_frames(buf) {
            writeln!(stdout, "{}", describe(&frame))?;
        }
    } else {
        for frame in decoder.process(buf) {
            writeln!(stdout, "{}", describe(&frame))?;
        }
    }

    if decoder.pending() != 0 {
        tracing::debug!(pending = decoder.pending(), "input ended inside a frame, discarding");
    }

    stdout.flush()?;

    Ok(())
}
