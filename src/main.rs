use clap::Parser;
use kisagold_storefront::config::cli::Command;
use kisagold_storefront::config::toml_config::CatalogSource;
use kisagold_storefront::core::contact::whatsapp_url;
use kisagold_storefront::core::Storage;
use kisagold_storefront::utils::logger::{self, LogFormat};
use kisagold_storefront::utils::validation::validate_required_field;
use kisagold_storefront::{
    CatalogProvider, CliConfig, FallbackCatalog, FetchResult, LanguagePreference, LoadingController,
    LocalStorage, Locale, PriceService, RemoteCatalog, Result, StaticCatalog, TomlConfig,
    Translator,
};
use std::io::{IsTerminal, Write};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let log_format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(log_format, cli.verbose);

    tracing::info!("Starting kisagold CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let preference = LanguagePreference::new(LocalStorage::new(&settings.language.data_dir));
    let locale = match &cli.lang {
        Some(code) => code.parse()?,
        None => match preference.saved().await {
            Some(locale) => locale,
            None => settings.default_locale()?,
        },
    };

    if let Err(e) = run(cli.command, &settings, &preference, locale).await {
        tracing::error!("❌ Command failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(
    command: Command,
    settings: &TomlConfig,
    preference: &LanguagePreference<LocalStorage>,
    locale: Locale,
) -> Result<()> {
    match command {
        Command::Prices { output, table } => {
            let result = fetch_prices(settings).await?;

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&result)?;
                LocalStorage::new(".").write_file(&path, json.as_bytes()).await?;
                tracing::info!("📁 Price board saved to: {}", path);
            }

            if table {
                let translator = Translator::bundled()?;
                print!("{}", render_price_table(&result, locale, &translator));
            } else {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }
        Command::Products {
            category,
            sub_category,
            featured,
            search,
        } => {
            let catalog = catalog_provider(settings).await?;
            let products = if let Some(query) = search {
                catalog.search(&query).await?
            } else if let Some(limit) = featured {
                catalog.featured(limit).await?
            } else if let Some(sub_category) = sub_category {
                catalog.products_by_sub_category(&sub_category).await?
            } else {
                catalog
                    .products_by_category(category.as_deref().unwrap_or("all"))
                    .await?
            };
            println!("{}", serde_json::to_string_pretty(&products)?);
        }
        Command::Product { id, recommended } => {
            let catalog = catalog_provider(settings).await?;
            let product = catalog.product(id).await?;
            println!("{}", serde_json::to_string_pretty(&product)?);

            if let Some(limit) = recommended {
                let translator = Translator::bundled()?;
                let others = catalog.recommended(id, limit).await?;
                println!("\n{}", translator.translate(locale, "product.recommended", &[]));
                println!("{}", serde_json::to_string_pretty(&others)?);
            }
        }
        Command::Contact { message } => {
            println!("{}", whatsapp_url(&message.join(" ")));
        }
        Command::Language { code } => match code {
            Some(code) => {
                let locale = preference.change(&code).await?;
                println!("✅ Language changed to: {}", locale.display_code());
            }
            None => {
                for available in Locale::available() {
                    let marker = if available == locale { "*" } else { " " };
                    println!("{} {} {}", marker, available.display_code(), available.name());
                }
            }
        },
    }

    Ok(())
}

async fn fetch_prices(settings: &TomlConfig) -> Result<FetchResult> {
    let service = PriceService::new(settings.feed_endpoints()?.clone());
    let loading = LoadingController::new();

    let reporter = std::io::stderr().is_terminal().then(|| {
        let loading = loading.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(100));
            loop {
                ticker.tick().await;
                if loading.is_loading() {
                    eprint!("\r⏳ {:>3}%", loading.progress());
                    let _ = std::io::stderr().flush();
                }
            }
        })
    });

    let result = loading
        .with_loading(settings.loading_options(), service.fetch_price_data())
        .await;

    if let Some(reporter) = reporter {
        reporter.abort();
        eprintln!("\r⏳ {:>3}%", loading.progress());
    }
    result
}

async fn catalog_provider(settings: &TomlConfig) -> Result<Box<dyn CatalogProvider>> {
    let snapshot = match &settings.catalog.snapshot_path {
        Some(path) => StaticCatalog::load(&LocalStorage::new("."), path).await?,
        None => StaticCatalog::bundled()?,
    };

    let provider: Box<dyn CatalogProvider> = match settings.catalog.source {
        CatalogSource::Static => Box::new(snapshot),
        CatalogSource::Remote => {
            let base = validate_required_field("catalog.api_base_url", &settings.catalog.api_base_url)?;
            Box::new(RemoteCatalog::new(base.as_str()))
        }
        CatalogSource::RemoteWithFallback => {
            let base = validate_required_field("catalog.api_base_url", &settings.catalog.api_base_url)?;
            Box::new(FallbackCatalog::new(RemoteCatalog::new(base.as_str()), snapshot))
        }
    };
    Ok(provider)
}

/// Rupiah amount with dot thousands separators, e.g. `Rp 1.250.000`.
fn format_rupiah(amount: f64) -> String {
    let digits = format!("{:.0}", amount.abs());
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}Rp {}", sign, grouped)
}

fn render_price_table(result: &FetchResult, locale: Locale, translator: &Translator) -> String {
    let mut out = format!("{}\n", translator.translate(locale, "price.title", &[]));

    if let Some(time) = &result.last_update {
        out.push_str(&translator.translate(locale, "price.lastUpdate", &[("time", time.as_str())]));
        out.push('\n');
    }
    if result.groups.is_empty() {
        out.push_str(&translator.translate(locale, "price.unavailable", &[]));
        out.push('\n');
    }

    for group in &result.groups {
        out.push_str(&format!("\n{}\n", group.label.get(locale)));
        out.push_str(&format!(
            "{:<10} {:>18} {:>18}\n",
            translator.translate(locale, "price.weight", &[]),
            translator.translate(locale, "price.buy", &[]),
            translator.translate(locale, "price.buyback", &[])
        ));
        for row in &group.rows {
            out.push_str(&format!(
                "{:<10} {:>18} {:>18}\n",
                row.weight,
                format_rupiah(row.buy_price),
                format_rupiah(row.buyback_price)
            ));
        }
    }
    out
}
