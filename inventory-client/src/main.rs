use inventory_client::console::{Command, ConsolePresenter, HELP};
use inventory_client::{ClientConfig, ImageUpload, ProductStore};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(api_url = %config.api_url, "Inventory client starting");

    let http = config.build_http_client()?;
    let mut store = ProductStore::new(http, ConsolePresenter::stdio(), config);
    let banner = format!("Inventory @ {}", store.api().http().base_url());
    store.presenter_mut().print(&banner);
    store.load().await;

    loop {
        let prompt = match store.session().target() {
            Some(id) => format!("edit #{}> ", id),
            None => "> ".to_string(),
        };
        store.presenter_mut().prompt(&prompt);
        let Some(line) = store.presenter_mut().read_line() else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                store.presenter_mut().print(&message);
                continue;
            }
        };

        match command {
            Command::List => {
                store.search("");
            }
            Command::Reload => {
                store.load().await;
            }
            Command::Search(term) => {
                store.search(&term);
            }
            Command::Stats => {
                let stats = store.stats();
                store.presenter_mut().print_stats(&stats);
            }
            Command::Edit(id) => {
                let summary = store
                    .edit(id)
                    .map(|p| format!("Editing #{}: {};{};{};{}", p.id, p.name, p.price, p.quantity, p.description));
                let message = summary.unwrap_or_else(|| format!("No loaded product with id {}", id));
                store.presenter_mut().print(&message);
            }
            Command::Cancel => {
                store.cancel();
            }
            Command::Submit(args) => {
                let image = match &args.image {
                    Some(path) => match ImageUpload::from_path(path).await {
                        Ok(image) => Some(image),
                        Err(e) => {
                            store
                                .presenter_mut()
                                .print(&format!("Cannot read image {}: {}", path.display(), e));
                            continue;
                        }
                    },
                    None => None,
                };
                store.submit(&args.fields, image).await;
            }
            Command::Delete(id) => {
                store.remove(id).await;
            }
            Command::Help => store.presenter_mut().print(HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}
