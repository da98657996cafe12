use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use astrologic_client::SynthesisClient;
use astrologic_core::synthesis::planet_symbol;
use astrologic_core::{
    render_sections, BirthData, CoreConfig, DisplaySection, PhaseTable, ReadingOutcome,
    ReadingParser, Synthesis,
};

#[derive(Parser)]
#[command(name = "astrologic")]
#[command(about = "AstroLogic reading CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a generated reading into sections
    Parse {
        /// File holding the reading (reads stdin when omitted)
        file: Option<PathBuf>,
        /// Print sections as JSON
        #[arg(long)]
        json: bool,
        /// Print sections as normalised markdown
        #[arg(long, conflicts_with = "json")]
        markdown: bool,
    },
    /// Request a synthesis and print the charts and reading
    Read {
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: String,
        /// Local time of birth (HH:MM, 24h)
        #[arg(long)]
        time: String,
        /// City of birth
        #[arg(long)]
        city: String,
        /// Name (optional)
        #[arg(long)]
        name: Option<String>,
        /// Gender (optional)
        #[arg(long)]
        gender: Option<String>,
        /// Skip the narrative reading
        #[arg(long)]
        data_only: bool,
    },
    /// List the narrative phases and their header labels
    Phases,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("astrologic_client=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let parser = ReadingParser::standard();

    match cli.command {
        Some(Commands::Parse {
            file,
            json,
            markdown,
        }) => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read reading from stdin")?;
                    buf
                }
            };

            let sections = parser.parse(&raw);
            if json {
                println!("{}", serde_json::to_string_pretty(&sections)?);
            } else if markdown {
                println!("{}", render_sections(&sections));
            } else {
                print!("{}", format_sections(&sections));
            }
        }
        Some(Commands::Read {
            dob,
            time,
            city,
            name,
            gender,
            data_only,
        }) => {
            let data = BirthData::new(name.as_deref(), gender.as_deref(), &dob, &time, &city)?;
            let cfg = CoreConfig::from_env_values(
                std::env::var("ASTRO_SYNTHESIS_URL").ok(),
                std::env::var("ASTRO_REQUEST_TIMEOUT_SECS").ok(),
                None,
            )?;
            let client = SynthesisClient::new(&cfg)?;

            if data_only {
                let synthesis = client.synthesis_data_only(&data).await?;
                print!("{}", format_synthesis(&synthesis));
            } else {
                let resp = client.synthesise(&data).await?;
                print!("{}", format_synthesis(&resp.synthesis));
                println!();
                match resp.reading_outcome(&parser) {
                    ReadingOutcome::Sections(sections) => print!("{}", format_sections(&sections)),
                    ReadingOutcome::Unavailable(note) => println!("{}", note),
                }
            }
        }
        Some(Commands::Phases) => {
            for label in PhaseTable::standard().entries() {
                println!(
                    "{} {:<12} {} / {}",
                    label.glyph,
                    label.phase.key(),
                    label.burmese,
                    label.english
                );
            }
        }
        None => {
            println!("Use 'astrologic --help' for commands");
        }
    }

    Ok(())
}

fn format_sections(sections: &[DisplaySection]) -> String {
    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{} {}\n", section.icon, section.title));
        if !section.content.is_empty() {
            out.push_str(&section.content);
            out.push('\n');
        }
    }
    out
}

fn push_row(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(&format!("  {:<18} {}\n", label, value));
    }
}

fn format_synthesis(synthesis: &Synthesis) -> String {
    let mut out = String::new();

    out.push_str("Western (Tropical)\n");
    for (planet, placement) in synthesis.western.placements() {
        let label = format!("{} {}", planet_symbol(planet).unwrap_or(" "), planet);
        push_row(&mut out, &label, placement);
    }
    push_row(&mut out, "↑ Ascendant", &synthesis.western.ascendant);
    push_row(
        &mut out,
        "Aspects",
        &synthesis.western.dominant_aspects.join(", "),
    );

    let vedic = &synthesis.vedic;
    out.push_str("\nVedic (Sidereal)\n");
    push_row(&mut out, "Nakshatra", &vedic.nakshatra);
    if vedic.nakshatra_pada > 0 {
        push_row(&mut out, "Pada", &vedic.nakshatra_pada.to_string());
    }
    push_row(&mut out, "Nakshatra lord", &vedic.nakshatra_lord);
    push_row(&mut out, "Mahadasha", &vedic.mahadasha);
    push_row(&mut out, "Mahadasha ends", &vedic.mahadasha_ends);
    push_row(&mut out, "Next dasha", &vedic.next_dasha);

    let mahabote = &synthesis.mahabote;
    out.push_str("\nMahabote\n");
    push_row(
        &mut out,
        "Birth day",
        format!("{} {}", mahabote.birth_day, mahabote.birth_day_burmese).trim(),
    );
    push_row(&mut out, "House", &mahabote.house_name);
    push_row(&mut out, "Ruling planet", &mahabote.ruling_planet);
    if mahabote.be_year != 0 {
        push_row(&mut out, "Burmese Era year", &mahabote.be_year.to_string());
    }
    push_row(&mut out, "Nakshatra (Burmese)", &mahabote.nakshatra_burmese);
    if mahabote.has_valid_grid() {
        push_row(&mut out, "Grid", &format!("{} of 7", mahabote.grid_number));
    }
    push_row(&mut out, "Characteristics", &mahabote.characteristics);

    out
}
