//! Command implementations for the HydroMap CLI.
//!
//! Each subcommand loads a dataset catalog (local file or http(s) URL),
//! indexes it the same way the map does, and writes CSV to stdout.

use clap::Subcommand;
use hydromap_catalog::geometry::BoundingBox;

pub mod report;
pub mod search;
pub mod source;

#[derive(Subcommand)]
pub enum Command {
    /// Count catalog datasets per layer
    Summary {
        /// Catalog GeoJSON path or http(s) URL
        #[arg(short = 'c', long)]
        catalog: String,
    },

    /// List the datasets a watershed popup would offer
    Watershed {
        /// Catalog GeoJSON path or http(s) URL
        #[arg(short = 'c', long)]
        catalog: String,

        /// HUC8 code of the watershed
        huc8: String,

        /// Watershed polygons GeoJSON, used to resolve the watershed name
        #[arg(short = 'w', long)]
        watersheds: Option<String>,
    },

    /// List every watershed polygon with its catalog dataset count
    Watersheds {
        /// Catalog GeoJSON path or http(s) URL
        #[arg(short = 'c', long)]
        catalog: String,

        /// Watershed polygons GeoJSON path or http(s) URL
        #[arg(short = 'w', long)]
        watersheds: String,
    },

    /// Find datasets inside a bounding box or a set of watersheds
    Search {
        /// Catalog GeoJSON path or http(s) URL
        #[arg(short = 'c', long)]
        catalog: String,

        /// Bounding box as N,W,S,E
        #[arg(long, value_parser = search::parse_bbox, allow_hyphen_values = true,
              required_unless_present = "huc", conflicts_with = "huc")]
        bbox: Option<BoundingBox>,

        /// HUC8 codes (repeat or comma-separate)
        #[arg(long, value_delimiter = ',')]
        huc: Vec<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Summary { catalog } => report::run_summary(&catalog).await,
        Command::Watershed {
            catalog,
            huc8,
            watersheds,
        } => report::run_watershed(&catalog, &huc8, watersheds.as_deref()).await,
        Command::Watersheds {
            catalog,
            watersheds,
        } => report::run_watersheds(&catalog, &watersheds).await,
        Command::Search { catalog, bbox, huc } => {
            let area = match bbox {
                Some(bbox) => search::Area::Bounds(bbox),
                None => search::Area::Watersheds(huc),
            };
            search::run_search(&catalog, &area).await
        }
    }
}
