//! CLI argument definitions for the MongoDB sink.

use clap::Args;
use measurement_populate::CommonPopulateArgs;

/// MongoDB-specific populate arguments.
#[derive(Args, Clone, Debug)]
pub struct MongoDBPopulateArgs {
    /// MongoDB connection string overriding `mongo.uri` from the configuration file
    #[arg(long, env = "MONGODB_CONNECTION_STRING")]
    pub mongodb_connection_string: Option<String>,

    #[command(flatten)]
    pub common: CommonPopulateArgs,
}
