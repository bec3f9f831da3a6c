use clap::{Parser, Subcommand};
use reqwest::header::CONTENT_TYPE;

#[derive(Parser)]
#[command(name = "saludo-cli")]
#[command(about = "Invoke the functions of a running saludo-gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:7071")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Call the forwarding function
    Saludo {
        /// Value forwarded upstream as `nombre`
        #[arg(short, long)]
        nombre: Option<String>,

        #[arg(long, default_value = "/api/SaludoFunction")]
        path: String,
    },
    /// Call the greeting function
    Hello {
        #[arg(long, default_value = "/api/Greeting")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::Saludo { nombre, path } => {
            let mut req = client.get(format!("{}{}", cli.url, path));
            if let Some(nombre) = nombre {
                req = req.query(&[("nombre", nombre)]);
            }
            req.send().await?
        }
        Commands::Hello { path } => client.get(format!("{}{}", cli.url, path)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let content_type = res
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: function returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    println!("{} ({})", status, content_type);
    // Pretty-print JSON bodies, pass everything else through
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
