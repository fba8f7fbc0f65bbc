//! Command execution against the library

use crate::cli::{Command, Scope};
use anyhow::{Context, Result, anyhow, bail};
use playlog_config::StorageConfig;
use playlog_core::{Collection, Game, GameStatus, Library, Report};
use playlog_storage::{LibraryFile, open_repository};
use std::cmp::Ordering;
use std::io::Write;
use tracing::{debug, info, warn};

/// Application state
pub struct App {
    /// Every collection, as loaded from disk
    library: Library,

    /// Where the library is saved after a change
    library_file: LibraryFile,

    /// Export/import defaults
    storage: StorageConfig,
}

impl App {
    /// Load the library named by `storage`
    pub fn open(storage: StorageConfig) -> Result<Self> {
        let library_file = LibraryFile::new(&storage.library_path);
        let library = library_file
            .load()
            .with_context(|| format!("Failed to load {}", library_file.path().display()))?;
        debug!("{} collections loaded", library.len());

        Ok(Self {
            library,
            library_file,
            storage,
        })
    }

    #[cfg(test)]
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Run one command, writing its output to `out`
    pub fn run(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::ListCollections => {
                if self.library.is_empty() {
                    writeln!(out, "No collections.")?;
                }
                for collection in self.library.collections() {
                    writeln!(out, "{}", collection)?;
                }
            }
            Command::CreateCollection { name } => {
                self.library.create_collection(&name)?;
                self.save()?;
                writeln!(out, "Collection created.")?;
            }
            Command::DeleteCollection { name } => {
                self.library
                    .delete_collection(&name)
                    .ok_or_else(|| anyhow!("Collection not found: {}", name))?;
                self.save()?;
                writeln!(out, "Collection deleted.")?;
            }
            Command::ListGames { collection } => {
                let collection = self.collection(&collection)?;
                if collection.is_empty() {
                    writeln!(out, "No games.")?;
                }
                for game in collection {
                    writeln!(out, "{}", game)?;
                }
            }
            Command::AddGame {
                collection,
                title,
                genre,
                platform,
                status,
                hours,
                rating,
            } => {
                let mut game = Game::new(title, genre, platform)?;
                game.set_hours_played(hours)?;
                game.set_status(GameStatus::from_name_or_label(&status))?;
                if let Some(rating) = rating {
                    game.set_rating(rating)?;
                }
                self.collection_mut(&collection)?.add(game)?;
                self.save()?;
                writeln!(out, "Game added.")?;
            }
            Command::UpdateGame {
                collection,
                title,
                new_title,
                genre,
                platform,
                status,
                hours,
                rating,
            } => {
                let current = self
                    .collection(&collection)?
                    .find(&title)
                    .ok_or_else(|| anyhow!("Game not found: {}", title))?;
                if let Some(hours) = hours {
                    if hours < current.hours_played() {
                        bail!(
                            "Hours played cannot be reduced ({}h -> {}h)",
                            current.hours_played(),
                            hours
                        );
                    }
                }

                self.collection_mut(&collection)?.update(&title, |mut game| {
                    if let Some(hours) = hours {
                        game.set_hours_played(hours)?;
                    }
                    if let Some(status) = &status {
                        game.set_status(GameStatus::from_name_or_label(status))?;
                    }
                    if let Some(rating) = rating {
                        game.set_rating(rating)?;
                    }
                    if let Some(genre) = genre {
                        game.set_genre(genre);
                    }
                    if let Some(new_title) = new_title {
                        game.set_title(new_title)?;
                    }
                    if let Some(platform) = platform {
                        let mut record = game.to_record();
                        record.platform = platform;
                        game = Game::from_record(record)?;
                    }
                    Ok(game)
                })?;
                self.save()?;
                writeln!(out, "Game updated.")?;
            }
            Command::RemoveGame { collection, title } => {
                let removed = self.collection_mut(&collection)?.remove(&title);
                if removed > 0 {
                    self.save()?;
                }
                writeln!(out, "Removed {} game(s).", removed)?;
            }
            Command::ResetGame { collection, title } => {
                self.collection_mut(&collection)?.update(&title, |mut game| {
                    game.reset()?;
                    Ok(game)
                })?;
                self.save()?;
                writeln!(out, "Game reset.")?;
            }
            Command::TotalHours(scope) => {
                let report = self.report(&scope)?;
                writeln!(out, "Total hours: {}", report.total_hours())?;
            }
            Command::AverageRating(scope) => {
                let report = self.report(&scope)?;
                writeln!(
                    out,
                    "Average rating (finished): {:.2}",
                    report.average_rating_finished()
                )?;
            }
            Command::StatusPercentages(scope) => {
                let report = self.report(&scope)?;
                let percentages = report.percentage_by_status();
                if percentages.is_empty() {
                    writeln!(out, "No games.")?;
                }
                for (status, percent) in percentages {
                    writeln!(out, "{}: {:.2}%", status, percent)?;
                }
            }
            Command::TopGames(scope) => {
                let report = self.report(&scope)?;
                print_games(out, &report.top5_by_hours(), |game| {
                    format!("{} - {}h", game.title(), game.hours_played())
                })?;
            }
            Command::FilterGenre { genre, scope } => {
                let report = self.report(&scope)?;
                print_games(out, &report.filter_by_genre(&genre), |game| {
                    format!("{} ({})", game.title(), game.genre())
                })?;
            }
            Command::FilterPlatform { platform, scope } => {
                let report = self.report(&scope)?;
                print_games(out, &report.filter_by_platform(platform.as_str()), |game| {
                    format!("{} ({})", game.title(), game.platform())
                })?;
            }
            Command::FilterStatus { status, scope } => {
                let status = GameStatus::from_name_or_label(&status);
                let report = self.report(&scope)?;
                print_games(out, &report.filter_by_status(status), |game| {
                    format!("{} ({})", game.title(), game.status())
                })?;
            }
            Command::Search { text, scope } => {
                let report = self.report(&scope)?;
                print_games(out, &report.search_by_title(&text), |game| {
                    game.title().to_string()
                })?;
            }
            Command::SortByHours(scope) => {
                let report = self.report(&scope)?;
                print_games(out, &report.sort_by_hours_desc(), |game| {
                    format!("{} - {}h", game.title(), game.hours_played())
                })?;
            }
            Command::SortByRating(scope) => {
                let report = self.report(&scope)?;
                print_games(out, &report.sort_by_rating_desc(), |game| {
                    format!("{} - rating {}", game.title(), game.rating().unwrap_or_default())
                })?;
            }
            Command::Report(scope) => {
                let summary = self.report(&scope)?.summary();
                writeln!(out, "Games: {}", summary.game_count)?;
                writeln!(out, "Total hours: {:.1}h", summary.total_hours)?;
                writeln!(out, "Average rating: {:.1}", summary.average_rating)?;
                writeln!(out, "Top 5: {}", summary.top_titles.join(", "))?;
            }
            Command::ShowGame { collection, title } => {
                let game = self.game(&collection, &title)?;
                writeln!(out, "{}", game.describe())?;
            }
            Command::ShowGameDetails { collection, title } => {
                let game = self.game(&collection, &title)?;
                writeln!(out, "{}", game.debug_describe())?;
            }
            Command::CompareGames {
                collection,
                first,
                second,
            } => {
                let a = self.game(&collection, &first)?;
                let b = self.game(&collection, &second)?;
                if a == b {
                    writeln!(out, "'{}' and '{}' are the same game.", first, second)?;
                } else {
                    writeln!(out, "'{}' and '{}' are different games.", first, second)?;
                    match a.compare_hours(b) {
                        Ordering::Less => writeln!(out, "  {}", fewer_hours(a, b))?,
                        Ordering::Greater => writeln!(out, "  {}", fewer_hours(b, a))?,
                        Ordering::Equal => {
                            writeln!(out, "  Both have {}h played.", a.hours_played())?
                        }
                    }
                }
            }
            Command::Export {
                file,
                format,
                collection,
            } => {
                let path = file.unwrap_or_else(|| self.storage.export_path.clone());
                let format = format.unwrap_or(self.storage.export_format);
                if let Some(name) = &collection {
                    self.collection(name)?;
                }
                let games: Vec<Game> = self.library.games(collection.as_deref()).cloned().collect();
                open_repository(format, &path)?.save_games(&games)?;
                info!("Exported {} games as {}", games.len(), format);
                writeln!(out, "Saved {} games to {}", games.len(), path.display())?;
            }
            Command::Import { file, format, into } => {
                let path = file.unwrap_or_else(|| self.storage.export_path.clone());
                let format = format.unwrap_or(self.storage.export_format);
                let games = open_repository(format, &path)?
                    .load_games()
                    .with_context(|| format!("Failed to read {}", path.display()))?;

                writeln!(out, "Loaded {} games:", games.len())?;
                for game in &games {
                    writeln!(out, "  - {} ({})", game.title(), game.platform())?;
                }

                if let Some(name) = into {
                    let added = self.import_into(&name, games)?;
                    self.save()?;
                    writeln!(out, "Added {} games to '{}'.", added, name)?;
                }
            }
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        self.library_file
            .save(&self.library)
            .with_context(|| format!("Failed to save {}", self.library_file.path().display()))
    }

    fn collection(&self, name: &str) -> Result<&Collection> {
        self.library
            .collection(name)
            .ok_or_else(|| anyhow!("Collection not found: {}", name))
    }

    fn collection_mut(&mut self, name: &str) -> Result<&mut Collection> {
        self.library
            .collection_mut(name)
            .ok_or_else(|| anyhow!("Collection not found: {}", name))
    }

    fn game(&self, collection: &str, title: &str) -> Result<&Game> {
        self.collection(collection)?
            .find(title)
            .ok_or_else(|| anyhow!("Game not found: {}", title))
    }

    fn report(&self, scope: &Scope) -> Result<Report<'_>> {
        if let Some(name) = &scope.collection {
            self.collection(name)?;
        }
        Ok(Report::new(self.library.games(scope.collection.as_deref())))
    }

    /// Add games to a collection, skipping ones it already holds
    fn import_into(&mut self, name: &str, games: Vec<Game>) -> Result<usize> {
        if self.library.collection(name).is_none() {
            self.library.create_collection(name)?;
        }
        let collection = self.collection_mut(name)?;

        let mut added = 0;
        for game in games {
            let title = game.title().to_string();
            match collection.add(game) {
                Ok(()) => added += 1,
                Err(err) => warn!("Skipping '{}': {}", title, err),
            }
        }
        Ok(added)
    }
}

fn print_games<F>(out: &mut impl Write, games: &[&Game], line: F) -> Result<()>
where
    F: Fn(&Game) -> String,
{
    if games.is_empty() {
        writeln!(out, "No games found.")?;
    }
    for &game in games {
        writeln!(out, "{}", line(game))?;
    }
    Ok(())
}

fn fewer_hours(less: &Game, more: &Game) -> String {
    format!(
        "{} has fewer hours ({}h) than {} ({}h)",
        less.title(),
        less.hours_played(),
        more.title(),
        more.hours_played()
    )
}
