use std::{fs, path::PathBuf};

use clap::Args;
use dormitory_app::{
    database::{self, Db},
    rooms::{PgRoomsService, RoomDetails, RoomType, RoomUuid, RoomsService, data::NewRoom},
};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Args)]
pub(crate) struct ImportRoomsArgs {
    /// YAML file with a top-level `rooms` list
    #[arg(long)]
    file: PathBuf,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

#[derive(Debug, Deserialize)]
struct RoomsFile {
    rooms: Vec<RoomEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoomEntry {
    number: String,
    floor: String,
    capacity: u8,
    #[serde(rename = "type", default = "default_room_type")]
    room_type: RoomType,
    monthly_rate: Decimal,
    #[serde(default)]
    amenities: Vec<String>,
    #[serde(default)]
    description: String,
}

fn default_room_type() -> RoomType {
    RoomType::Standard
}

impl From<RoomEntry> for RoomDetails {
    fn from(entry: RoomEntry) -> Self {
        Self {
            number: entry.number,
            floor: entry.floor,
            capacity: entry.capacity,
            room_type: entry.room_type,
            monthly_rate: entry.monthly_rate,
            amenities: entry.amenities,
            description: entry.description,
        }
    }
}

fn parse_rooms(contents: &str) -> Result<Vec<RoomDetails>, serde_norway::Error> {
    let file: RoomsFile = serde_norway::from_str(contents)?;

    Ok(file.rooms.into_iter().map(RoomDetails::from).collect())
}

pub(crate) async fn run(args: ImportRoomsArgs) -> Result<(), String> {
    let contents = fs::read_to_string(&args.file)
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let rooms = parse_rooms(&contents)
        .map_err(|error| format!("failed to parse {}: {error}", args.file.display()))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgRoomsService::new(Db::new(pool));
    let mut failed = 0_usize;

    for details in rooms {
        let number = details.number.clone();

        match service
            .create_room(NewRoom {
                uuid: RoomUuid::new(),
                details,
            })
            .await
        {
            Ok(room) => println!("created {} ({})", room.number, room.uuid),
            Err(error) => {
                failed += 1;
                eprintln!("skipped {number}: {error}");
            }
        }
    }

    if failed > 0 {
        return Err(format!("{failed} room(s) could not be imported"));
    }

    Ok(())
}
