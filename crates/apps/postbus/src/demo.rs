//! Demo mode - an in-memory backend with sample messages

use anyhow::Result;
use chrono::{TimeZone, Utc};
use inbox::{InMemoryMessageService, InboxConfig, Message, Navigator};

/// In-memory backend seeded with a few messages per folder
pub fn seeded_service(config: &InboxConfig) -> InMemoryMessageService {
    let at = |month, day, hour| Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).single();

    let inbox = [
        ("101", "Uitnodiging kennismakingsgesprek", (9, 2, 9), false),
        ("102", "Re: Vacature backend developer", (9, 4, 14), true),
        ("103", "Bevestiging afspraak", (8, 28, 11), true),
        ("104", "Nieuwe match gevonden", (9, 5, 8), false),
    ];
    let outbox = [
        ("201", "Vraag over de opdracht", (9, 1, 16), true),
        ("202", "CV en motivatie", (8, 30, 10), true),
    ];

    let build = |rows: &[(&str, &str, (u32, u32, u32), bool)]| -> Vec<Message> {
        rows.iter()
            .filter_map(|&(id, subject, (month, day, hour), read)| {
                Some(Message::new(id, subject, at(month, day, hour)?, read))
            })
            .collect()
    };

    let service = InMemoryMessageService::new();
    service.set_listing(&config.inbox_endpoint, build(&inbox));
    service.set_listing(&config.outbox_endpoint, build(&outbox));
    service
}

/// Navigator that prints the detail URL instead of opening a browser
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn open(&self, url: &str) -> Result<()> {
        println!("-> {}", url);
        Ok(())
    }
}
