//! # Order Service
//!
//! Entry point of the backend. Every operation reads the period sheet fresh
//! from the spreadsheet service; nothing is cached between calls.
//!
//! ## Operations
//!
//! - `create_order_list_image`: builds and publishes today's roster.
//!   1. Resolve this month's sheet and load it.
//!   2. Find today's column; a missing column is an error.
//!   3. Compute last month's debtors. Any failure here is logged and treated
//!      as "nobody owes", the roster is still produced.
//!   4. Collect today's registrants and pick one ticket collector per floor.
//!   5. Stamp the date on the template, render the pages on a blocking thread
//!      and upload them in order.
//! - `get_menu`: dishes of a given day.
//! - `order`: toggles a user's order for one day or the rest of the month.
//! - `unpaid_list`: last month's debtors.

use std::sync::Arc;

use chrono::{Local, Months, NaiveDate};
use common::model::menu::Menu;
use common::model::roster::{DebtMap, OrderListImage};
use common::requests::OrderRequest;
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::Client;

use crate::config::Config;
use crate::error::{OrderError, OrderResult};
use crate::services::assets::github::GithubAssetStore;
use crate::services::assets::AssetStore;
use crate::services::cache::redis_cache::RedisTokenCache;
use crate::services::orders::{menu, write};
use crate::services::roster::compositor::{self, FontSource, RenderedPage};
use crate::services::roster::template::{HttpTemplate, TemplateSource};
use crate::services::roster::{debt, publish, registration};
use crate::services::sheets::google::GoogleSheetsClient;
use crate::services::sheets::grid::DATE_FORMAT;
use crate::services::sheets::{find_period_sheet, load_grid, sheet_title, Grid, SpreadsheetService};
use crate::services::users::sqlite::SqliteUserDirectory;
use crate::services::users::UserDirectory;

/// The roster service, wired to its spreadsheet, image store, user directory
/// and template source.
pub struct OrderService {
    sheets: Arc<dyn SpreadsheetService>,
    assets: Arc<dyn AssetStore>,
    users: Arc<dyn UserDirectory>,
    template: Arc<dyn TemplateSource>,
    fonts: FontSource,
    image_folder: String,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl OrderService {
    pub fn new(
        sheets: Arc<dyn SpreadsheetService>,
        assets: Arc<dyn AssetStore>,
        users: Arc<dyn UserDirectory>,
        template: Arc<dyn TemplateSource>,
        fonts: FontSource,
        image_folder: impl Into<String>,
    ) -> Self {
        Self {
            sheets,
            assets,
            users,
            template,
            fonts,
            image_folder: image_folder.into(),
        }
    }

    /// Wires the production collaborators described by `config`.
    pub async fn from_config(config: &Config) -> OrderResult<Self> {
        let http = Client::builder().timeout(config.http_timeout).build()?;
        let tokens = Arc::new(RedisTokenCache::connect(&config.redis_url).await?);
        let sheets = GoogleSheetsClient::new(
            http.clone(),
            &config.sheets_api_base,
            &config.spreadsheet_id,
            tokens,
        );
        let assets = GithubAssetStore::new(
            http.clone(),
            &config.github_api_base,
            &config.github_owner,
            &config.github_repo,
            &config.github_branch,
            &config.github_token,
        );
        Ok(Self::new(
            Arc::new(sheets),
            Arc::new(assets),
            Arc::new(SqliteUserDirectory::new(&config.users_db_path)),
            Arc::new(HttpTemplate::new(http, &config.base_image_url)),
            FontSource::new(&config.fonts_dir, &config.font_family),
            &config.image_folder,
        ))
    }

    async fn period_grid(&self, date: NaiveDate) -> OrderResult<(i64, Grid)> {
        let sheet_id = find_period_sheet(self.sheets.as_ref(), date).await?;
        let grid = load_grid(self.sheets.as_ref(), sheet_id).await?;
        Ok((sheet_id, grid))
    }

    /// Builds and publishes today's roster with an OS-seeded pick.
    pub async fn create_order_list_image(&self) -> OrderResult<OrderListImage> {
        let mut rng = StdRng::from_os_rng();
        self.create_order_list_image_on(today(), &mut rng).await
    }

    /// Builds and publishes the roster of `today`, picking with `rng`.
    pub async fn create_order_list_image_on<R: Rng + Send>(
        &self,
        today: NaiveDate,
        rng: &mut R,
    ) -> OrderResult<OrderListImage> {
        let (_, grid) = self.period_grid(today).await?;
        let date_column = grid
            .date_column(today)
            .ok_or_else(|| OrderError::DateNotFound {
                date: today.format(DATE_FORMAT).to_string(),
            })?;

        let debts = match self.unpaid_list_on(today).await {
            Ok(debts) => debts,
            Err(e) => {
                error!("{}", OrderError::DebtComputationFailed(e.to_string()));
                DebtMap::new()
            }
        };
        let blacklist = self.users.blacklisted_names()?;
        let registrations = registration::collect(&grid, date_column, &debts, &blacklist);
        let floor16_pick = registration::pick(&registrations.floor16, rng);
        let floor19_pick = registration::pick(&registrations.floor19, rng);
        info!(
            "{} registered on {} ({} unpaid)",
            registrations.entries.len(),
            today.format(DATE_FORMAT),
            registrations.entries.iter().filter(|e| e.is_unpaid()).count()
        );

        let mut base = self.template.fetch().await?;
        let fonts = self.fonts.clone();
        let entries = registrations.entries;
        let rendered = tokio::task::spawn_blocking(move || -> OrderResult<Vec<RenderedPage>> {
            let fonts = fonts.load()?;
            compositor::stamp_date(&mut base, today, &fonts);
            compositor::render_pages(&base, &entries, &fonts)
        })
        .await??;

        let pages = publish::publish(rendered, self.assets.as_ref(), &self.image_folder).await?;
        Ok(OrderListImage {
            pages,
            floor16_pick,
            floor19_pick,
        })
    }

    /// Dishes served on `date`, read from the current period sheet.
    pub async fn get_menu(&self, date: NaiveDate) -> OrderResult<Menu> {
        let (_, grid) = self.period_grid(today()).await?;
        Ok(menu::parse_menu(&grid, date))
    }

    /// Places or cancels an order in this month's sheet.
    ///
    /// # Arguments
    /// * `request` - Who orders, from which day, and whether for the rest of the month.
    ///
    /// # Returns
    /// The success flag reported by the spreadsheet for the single ranged write.
    pub async fn order(&self, request: &OrderRequest) -> OrderResult<bool> {
        self.order_on(today(), request).await
    }

    /// Places or cancels `request` in the sheet of `today`'s period.
    pub async fn order_on(&self, today: NaiveDate, request: &OrderRequest) -> OrderResult<bool> {
        let user = self.users.find_by_user_name(&request.user_name)?;
        let (sheet_id, grid) = self.period_grid(today).await?;
        let update = write::plan_order(&grid, sheet_id, &user.full_name, request)?;
        let accepted = self.sheets.batch_update(&update).await?;
        info!(
            "{} {} from {} ({} day(s)): {}",
            request.user_name,
            if request.is_ordering { "ordered" } else { "cancelled" },
            request.date.format(DATE_FORMAT),
            update.end_column - update.start_column,
            if accepted { "accepted" } else { "rejected" }
        );
        Ok(accepted)
    }

    /// Users who left last month unpaid, keyed by sheet row.
    pub async fn unpaid_list(&self) -> OrderResult<DebtMap> {
        self.unpaid_list_on(today()).await
    }

    /// Debtors of the period before `today`'s.
    pub async fn unpaid_list_on(&self, today: NaiveDate) -> OrderResult<DebtMap> {
        let previous = today
            .checked_sub_months(Months::new(1))
            .ok_or_else(|| OrderError::SheetNotFound {
                title: format!("before {}", sheet_title(today)),
            })?;
        let (_, grid) = self.period_grid(previous).await?;
        debt::compute_unpaid(&grid)
    }
}
