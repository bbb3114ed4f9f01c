//! Interactive control menu for an AQUOS television.

use aquos_remote::{AquosClient, ClientConfig};
use clap::Parser;
use std::io::{BufRead, Write};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(about = "Interactive control menu for an AQUOS television")]
struct Args {
    /// TCP port of the television's control service
    #[arg(long, default_value_t = 10002)]
    port: u16,

    /// Username for the login exchange
    #[arg(long)]
    user: Option<String>,

    /// Password for the login exchange
    #[arg(long)]
    pass: Option<String>,

    /// Host name or IP address of the television
    host: String,
}

/// Prompt until the operator types a number. `None` means stdin closed.
fn prompt(text: &str) -> Option<i64> {
    loop {
        print!("{text}");
        std::io::stdout().flush().ok()?;
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).ok()? == 0 {
            return None;
        }
        match line.trim().parse() {
            Ok(n) => return Some(n),
            Err(_) => println!("invalid number"),
        }
    }
}

const MENU: &str = "
1: Power on
2: Power off
3: Change Input (Toggle)
4: Change Input (TV)
5: Change Input
6: Channel Up
7: Channel Down
8: Change Volume
9: Get Volume
------------------------
0: Exit
> ";

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig {
        username: args.user,
        password: args.pass,
        ..ClientConfig::default()
    };

    let mut tv = AquosClient::connect(&args.host, args.port, config).await?;

    println!("TV Name          : {}", tv.name());
    println!("Model Name       : {}", tv.model_name());
    println!("Software Version : {}", tv.software_version());
    println!("Protocol Version : {}", tv.ip_protocol_version());

    loop {
        let choice = match prompt(MENU) {
            Some(n) => n,
            None => break,
        };

        match choice {
            0 => break,
            1 => tv.power(true).await?,
            2 => tv.power(false).await?,
            3 => tv.toggle_input().await?,
            4 => tv.input_tv().await?,
            5 => {
                if let Some(source) = prompt("Input number > ") {
                    tv.set_input(source.try_into().unwrap_or(0)).await?;
                }
            }
            6 => tv.channel_up().await?,
            7 => tv.channel_down().await?,
            8 => {
                if let Some(volume) = prompt("Volume 0 - 100 > ") {
                    tv.set_volume(volume.try_into().unwrap_or(0)).await?;
                }
            }
            9 => println!("Volume : {}", tv.volume().await?),
            _ => println!("invalid number"),
        }
    }

    tv.close().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
