use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use menagerie::cli::seeder::{SeedConfig, seed_keepers, seed_zoo};
use menagerie::cli::create_admin;
use menagerie::config::database::init_db_pool;

#[derive(Parser)]
#[command(name = "menagerie-cli")]
#[command(about = "Menagerie CLI - Administrative tools for the zoo API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a staff account (staff accounts cannot be created via the API)
    CreateAdmin {
        /// Username
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with sample habitats, enclosures and feedings
    Seed {
        /// Number of enclosures per habitat
        #[arg(long, default_value = "3")]
        enclosures: usize,

        /// Number of feedings per enclosure
        #[arg(long, default_value = "2")]
        feedings: usize,
    },
    /// Seed keeper accounts for development logins
    SeedKeepers {
        /// Number of keepers to create
        #[arg(short = 'k', long, default_value = "3")]
        keepers: usize,

        /// Password shared by all seeded keepers
        #[arg(long, default_value = "password123")]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let db = init_db_pool().await;

    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            password,
        } => {
            let username = username.unwrap_or_else(|| {
                Input::new()
                    .with_prompt("Username")
                    .interact_text()
                    .expect("Failed to read username")
            });
            let email = email.unwrap_or_else(|| {
                Input::new()
                    .with_prompt("Email")
                    .interact_text()
                    .expect("Failed to read email")
            });
            let password = password.unwrap_or_else(|| {
                Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .expect("Failed to read password")
            });

            match create_admin(&db, &username, &email, &password).await {
                Ok(()) => {
                    println!("✅ Staff account created successfully!");
                    println!("   Username: {}", username);
                    println!("   Email: {}", email);
                }
                Err(e) => {
                    eprintln!("❌ Error creating staff account: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Seed {
            enclosures,
            feedings,
        } => {
            let config = SeedConfig {
                enclosures_per_habitat: enclosures,
                feedings_per_enclosure: feedings,
            };

            match seed_zoo(&db, config).await {
                Ok(summary) => {
                    println!("✅ Sample zoo data created:");
                    println!("   Habitats: {}", summary.habitats);
                    println!("   Enclosures: {}", summary.enclosures);
                    println!("   Feedings: {}", summary.feedings);
                }
                Err(e) => {
                    eprintln!("❌ Error seeding zoo data: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::SeedKeepers { keepers, password } => match seed_keepers(&db, keepers, &password)
            .await
        {
            Ok(created) => {
                println!("✅ Created {} keeper accounts (password: {})", created, password);
            }
            Err(e) => {
                eprintln!("❌ Error seeding keepers: {}", e);
                std::process::exit(1);
            }
        },
    }
}
