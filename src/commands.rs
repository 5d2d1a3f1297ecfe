//! Subcommand handlers
//!
//! Results go to stdout; loader errors and progress go through tracing.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use djdatabass::core::{
    check_name_available, parse_produces, DjBrowser, DjDraft, DjRow, ListingStatus,
    NO_DJS_FOUND, NO_FAVOURITES_FOUND,
};
use djdatabass::models::{DjId, DjRecord, OptionLabel, PasswordChange, UsernameUpdate};
use djdatabass::stores::ToggleOutcome;
use djdatabass::{ApiClient, AuthContext};

use crate::{CredentialArgs, DjCommand, DjFields, FavCommand, ListArgs};

pub struct App {
    pub api: Arc<ApiClient>,
    pub auth: Arc<AuthContext>,
}

impl App {
    fn browser(&self) -> DjBrowser {
        DjBrowser::new(self.api.clone())
    }

    fn require_sign_in(&self) -> Result<()> {
        if !self.auth.is_authenticated() {
            bail!("Not signed in. Run `djdb login` first.");
        }
        Ok(())
    }

    pub async fn list(&self, args: ListArgs) -> Result<()> {
        let browser = self.browser();
        browser.mount().await;
        if args.favourites {
            self.require_sign_in()?;
            browser.load_favourites().await;
        } else if self.auth.is_authenticated() {
            // decoration only; a failure here does not hide the catalog
            browser.load_favourites().await;
        }

        if let Some(name) = &args.name {
            browser.set_search(name);
        }
        if args.genre.is_some() {
            browser.select_genre(args.genre.clone()).await;
        }
        browser.select_subgenre(args.subgenre.clone());
        browser.select_venue(args.venue.clone());
        if let Some(produces) = &args.produces {
            browser.select_produces(parse_produces(produces).map_err(anyhow::Error::msg)?);
        }

        let (listing, empty_text) = if args.favourites {
            (browser.favourites_listing(), NO_FAVOURITES_FOUND)
        } else {
            (browser.listing(), NO_DJS_FOUND)
        };

        for error in browser.errors() {
            tracing::warn!("{}", error.message);
        }

        match listing {
            ListingStatus::Rows(rows) => print_rows(&rows),
            ListingStatus::Empty => println!("{empty_text}"),
            ListingStatus::Error(message) => bail!(message),
        }
        Ok(())
    }

    pub async fn search(&self, term: &str) -> Result<()> {
        let djs = self.api.search_djs(term).await?;
        if djs.is_empty() {
            println!("{NO_DJS_FOUND}");
        }
        for dj in &djs {
            print_record_line(dj, false);
        }
        Ok(())
    }

    pub async fn genres(&self) -> Result<()> {
        print_labels(&self.api.get_genres().await.context("Error fetching genres")?);
        Ok(())
    }

    pub async fn subgenres(&self, genre: &str) -> Result<()> {
        let subgenres = self
            .api
            .get_subgenres(genre)
            .await
            .with_context(|| format!("Error fetching subgenres for {genre}"))?;
        print_labels(&subgenres);
        Ok(())
    }

    pub async fn venues(&self) -> Result<()> {
        print_labels(&self.api.get_venues().await.context("Error fetching venues")?);
        Ok(())
    }

    pub async fn fav(&self, command: FavCommand) -> Result<()> {
        self.require_sign_in()?;
        match command {
            FavCommand::List => {
                self.list(ListArgs {
                    favourites: true,
                    ..ListArgs::default()
                })
                .await
            }
            FavCommand::Add { id } => self.set_favourite(id, true).await,
            FavCommand::Remove { id } => self.set_favourite(id, false).await,
        }
    }

    async fn set_favourite(&self, id: DjId, favourite: bool) -> Result<()> {
        let browser = self.browser();
        let (catalog_loaded, favourites_loaded) =
            tokio::join!(browser.reload_catalog(), browser.load_favourites());
        if !favourites_loaded {
            bail!("Error fetching favourites");
        }
        if !catalog_loaded {
            tracing::warn!("Catalog unavailable; only current favourites can be changed");
        }

        if browser.is_favourite(id) == favourite {
            println!(
                "DJ {id} is {} a favourite",
                if favourite { "already" } else { "not" }
            );
            return Ok(());
        }

        match browser.toggle_favourite(id).await {
            None => bail!("No DJ with id {id}"),
            Some(ToggleOutcome::Committed { favourite: true }) => println!("Added DJ {id} to favourites"),
            Some(ToggleOutcome::Committed { favourite: false }) => {
                println!("Removed DJ {id} from favourites")
            }
            Some(ToggleOutcome::RolledBack { error, .. }) => bail!(error.message),
            Some(ToggleOutcome::Superseded) => {}
        }
        Ok(())
    }

    pub async fn dj(&self, command: DjCommand) -> Result<()> {
        match command {
            DjCommand::Show { id } => {
                let dj = self.api.get_dj(id).await?;
                print_details(&dj);
            }
            DjCommand::Add(fields) => {
                // open to anonymous visitors, like the web form
                let catalog = self.api.get_djs().await.context("Error fetching DJs")?;
                let draft = build_draft(DjDraft::default(), fields)?;
                check_name_available(&catalog, &draft.name)?;
                draft.validate()?;
                print_message(self.api.add_dj(&draft).await?, "DJ added");
            }
            DjCommand::Update { id, fields } => {
                self.require_sign_in()?;
                let existing = self.api.get_dj(id).await?;
                let draft = build_draft(DjDraft::from_record(&existing), fields)?;
                draft.validate()?;
                print_message(self.api.update_dj(id, &draft).await?, "DJ updated");
            }
            DjCommand::Delete { id } => {
                self.require_sign_in()?;
                print_message(self.api.delete_dj(id).await?, "DJ deleted");
            }
            DjCommand::UploadPicture { id, file } => {
                self.require_sign_in()?;
                print_message(
                    self.api.upload_dj_picture(id, &file).await?,
                    "Profile picture uploaded",
                );
            }
            DjCommand::DeletePicture { id } => {
                self.require_sign_in()?;
                print_message(
                    self.api.delete_dj_picture(id).await?,
                    "Profile picture removed",
                );
            }
        }
        Ok(())
    }

    pub async fn login(&self, creds: CredentialArgs, signup: bool) -> Result<()> {
        let user = if signup {
            self.api.signup(&creds.username, &creds.password).await?
        } else {
            self.api.login(&creds.username, &creds.password).await?
        };
        let name = user.map(|u| u.username).unwrap_or(creds.username);
        println!("Signed in as {name}");
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        if !self.auth.is_authenticated() {
            println!("Not signed in");
            return Ok(());
        }
        self.api.logout().await?;
        println!("Signed out");
        Ok(())
    }

    pub async fn me(
        &self,
        username: Option<String>,
        picture: Option<PathBuf>,
        remove_picture: bool,
    ) -> Result<()> {
        self.require_sign_in()?;
        if let Some(username) = username {
            let update = UsernameUpdate::new(&username)?;
            print_message(self.api.update_username(&update).await?, "Username updated");
        }
        if let Some(picture) = picture {
            let message = self
                .api
                .upload_profile_picture(&picture)
                .await
                .context("Failed to upload profile image")?;
            print_message(message, "Profile image uploaded successfully.");
        }
        if remove_picture {
            let message = self
                .api
                .delete_profile_picture()
                .await
                .context("Failed to delete profile image")?;
            print_message(message, "Profile image deleted successfully.");
        }

        let user = self.api.me().await?;
        println!("{} (id {})", user.username, user.id);
        if user.is_admin {
            println!("admin");
        }
        if let Some(picture) = &user.profile_picture {
            println!("picture: {picture}");
        }
        Ok(())
    }

    pub async fn password(&self, old: &str, new: &str, confirm: &str) -> Result<()> {
        self.require_sign_in()?;
        let change = PasswordChange::new(old, new, confirm)?;
        print_message(self.api.change_password(&change).await?, "Password changed");
        Ok(())
    }
}

/// Parse `Genre:Sub1,Sub2` into the genre and its subgenres
fn parse_genre_arg(arg: &str) -> Result<(String, Vec<String>)> {
    let (genre, subs) = arg.split_once(':').unwrap_or((arg, ""));
    let genre = genre.trim();
    if genre.is_empty() {
        bail!("Missing genre in {arg:?}");
    }
    let subs = subs
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    Ok((genre.to_string(), subs))
}

/// Apply command-line fields on top of `draft`. Given genres or venues replace
/// the existing ones; omitted fields are left alone.
fn build_draft(mut draft: DjDraft, fields: DjFields) -> Result<DjDraft> {
    if let Some(name) = fields.name {
        draft.name = name.trim().to_string();
    }

    if !fields.genres.is_empty() {
        for genre in draft.genres.clone() {
            draft.remove_genre(&genre);
        }
        for arg in &fields.genres {
            let (genre, subs) = parse_genre_arg(arg)?;
            draft.add_genre(&genre);
            for sub in subs {
                draft.add_subgenre(&genre, &sub);
            }
        }
    }

    if !fields.venues.is_empty() {
        draft.venues.clear();
        for venue in &fields.venues {
            draft.add_venue(venue);
        }
    }

    if let Some(produces) = fields.produces {
        if let Some(produces) = parse_produces(&produces).map_err(anyhow::Error::msg)? {
            draft.produces = produces;
        }
    }

    if let Some(city) = fields.city {
        let city = city.trim();
        draft.city = (!city.is_empty()).then(|| city.to_string());
    }

    Ok(draft)
}

fn print_rows(rows: &[DjRow]) {
    for row in rows {
        print_record_line(&row.dj, row.favourite);
    }
}

fn print_record_line(dj: &DjRecord, favourite: bool) {
    let marker = if favourite { "*" } else { " " };
    println!(
        "{marker} {:>5}  {:<24} {:<32} {}",
        dj.id,
        dj.name,
        dj.genres.join(", "),
        dj.venues.join(", ")
    );
}

fn print_details(dj: &DjRecord) {
    println!("{} (id {})", dj.name, dj.id);
    println!("  produces: {}", if dj.produces { "yes" } else { "no" });
    if let Some(city) = &dj.city {
        println!("  city: {city}");
    }
    for genre in &dj.genres {
        println!("  {}: {}", genre, dj.subgenres_of(genre).join(", "));
    }
    println!("  venues: {}", dj.venues.join(", "));
    if let Some(picture) = &dj.dj_profile_picture {
        println!("  picture: {picture}");
    }
}

fn print_labels<T: OptionLabel>(items: &[T]) {
    for item in items {
        println!("{}", item.label());
    }
}

fn print_message(message: Option<String>, fallback: &str) {
    println!("{}", message.as_deref().unwrap_or(fallback));
}
