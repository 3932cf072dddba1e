use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tree_index::config::{self, ListingConfig};
use tree_index::icons::IconSet;
use tree_index::templates::Templates;
use tree_index::{generate, output, scan, tree};

/// Flags that override config-file values.
#[derive(clap::Args, Clone)]
struct ListingArgs {
    /// Prefix for file links, use if files are on another host than the listing
    #[arg(short, long, global = true, value_name = "URL")]
    baseurl: Option<String>,

    /// Sub-path the pages are published under
    #[arg(long, global = true, value_name = "PATH")]
    basepath: Option<String>,

    /// Comma-separated suffixes of files served next to the pages
    #[arg(
        long = "ignoredextension",
        global = true,
        value_delimiter = ',',
        value_name = "EXTS"
    )]
    ignored_extensions: Option<Vec<String>>,

    /// Output directory [default: site]
    #[arg(short, long = "out", global = true, value_name = "DIR")]
    out: Option<String>,

    /// Directory with templates, icons.xml and img/
    #[arg(long, global = true, value_name = "DIR")]
    share_dir: Option<String>,

    /// Config file [default: ./tree-index.toml if present]
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl ListingArgs {
    /// Flags given on the command line, as a config layer.
    fn overrides(&self) -> toml::Value {
        let mut table = toml::Table::new();
        if let Some(baseurl) = &self.baseurl {
            table.insert("baseurl".into(), baseurl.clone().into());
        }
        if let Some(basepath) = &self.basepath {
            table.insert("basepath".into(), basepath.clone().into());
        }
        if let Some(extensions) = &self.ignored_extensions {
            let list = extensions.iter().cloned().map(toml::Value::String).collect();
            table.insert("ignored_extensions".into(), toml::Value::Array(list));
        }
        if let Some(out) = &self.out {
            table.insert("output".into(), out.clone().into());
        }
        if let Some(share_dir) = &self.share_dir {
            table.insert("share_dir".into(), share_dir.clone().into());
        }
        toml::Value::Table(table)
    }

    fn resolve(&self) -> Result<ListingConfig, Box<dyn std::error::Error>> {
        let cwd = std::env::current_dir()?;
        Ok(config::load_config(
            self.config.as_deref(),
            &cwd,
            self.overrides(),
        )?)
    }
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Small leak, at most once per call site
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "tree-index")]
#[command(about = "Static HTML directory listings from `tree -Js` output")]
#[command(long_about = "\
Static HTML directory listings from `tree -Js` output

Writes one index.html per directory of the tree, mirroring it under the
output directory. Each page lists a `..` link, then subdirectories, then
files, in the order the tree gives them.

  tree -Js files/ > tree.json
  tree-index tree.json -b https://files.example -o site

Links:
  Directories       <path>/<name>      (path is ./ or /<basepath>)
  Files             <baseurl>/<name>
  Ignored suffixes  <path>/<name>

Run 'tree-index gen-config' to generate a documented tree-index.toml.")]
#[command(version = version_string())]
#[command(subcommand_negates_reqs = true)]
struct Cli {
    /// Output of `tree -Js`
    #[arg(required = true, value_name = "TREE")]
    tree: Option<PathBuf>,

    #[command(flatten)]
    listing: ListingArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a `tree -Js` compatible document for a directory
    Scan {
        /// Directory to scan
        dir: PathBuf,
    },
    /// Validate a tree, the config and the share directory without writing
    Check {
        /// Output of `tree -Js`
        tree: PathBuf,
    },
    /// Print a stock tree-index.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Scan { dir }) => {
            let root = scan::scan(&dir)?;
            println!("{}", scan::to_tree_json(&root)?);
        }
        Some(Command::Check { tree: tree_path }) => {
            let config = cli.listing.resolve()?;
            println!("==> Checking {}", tree_path.display());
            let root = tree::load_tree(&tree_path)?;

            let share_dir = config::effective_share_dir(&config);
            Templates::load(&share_dir)?;
            IconSet::load(&share_dir)?;

            output::print_check_output(&root);
            println!("==> Tree, config and {} are valid", share_dir.display());
        }
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
        }
        None => {
            let tree_path = cli.tree.ok_or("missing tree file")?;
            let config = cli.listing.resolve()?;
            let root = tree::load_tree(&tree_path)?;

            println!(
                "==> Generating {} → {}",
                tree_path.display(),
                config.output
            );
            let pages = generate::generate(&root, &config, version_string())?;
            output::print_generate_output(&pages);
        }
    }

    Ok(())
}
