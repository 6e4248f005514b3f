use clap::{Parser, ValueEnum};
use movie_catalog::config::GenreFilterMode;
use movie_catalog::view::{Action, HttpCatalogClient, ListController, ListView, Preset};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    AllFilms,
    TopRank,
    LatestReleases,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::AllFilms => Preset::AllFilms,
            PresetArg::TopRank => Preset::TopRank,
            PresetArg::LatestReleases => Preset::LatestReleases,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "movie-catalog-browse")]
#[command(about = "Browse a running movie catalog from the terminal", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    server: String,

    #[arg(short, long, value_enum)]
    preset: Option<PresetArg>,

    /// Show only movies of this genre (exact match).
    #[arg(short, long)]
    genre: Option<String>,

    /// The server runs with `catalog.genre_filter: server`.
    #[arg(long)]
    server_genre_filter: bool,

    /// List the available genres and exit.
    #[arg(long)]
    genres: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_catalog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let client = match HttpCatalogClient::new(&args.server) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let genre_filter = if args.server_genre_filter {
        GenreFilterMode::Server
    } else {
        GenreFilterMode::Client
    };
    let mut controller = ListController::with_view(client, ListView::with_genre_filter(genre_filter));
    controller.dispatch(Action::Mount);
    controller.settle().await;

    if args.genres {
        for genre in controller.view().genres() {
            println!("{}", genre.value);
        }
        return;
    }

    if let Some(genre) = args.genre {
        controller.dispatch(Action::SelectGenre(genre));
    }

    if let Some(preset) = args.preset {
        let preset = Preset::from(preset);
        println!("{}", preset.label());
        controller.dispatch(Action::ApplyPreset(preset));
    }
    controller.settle().await;

    print!("{}", controller.view().render());

    if controller.view().error().is_some() {
        std::process::exit(1);
    }
}
