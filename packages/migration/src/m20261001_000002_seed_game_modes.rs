use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, Statement};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum GameModes {
    Table,
    Id,
    Slug,
    DisplayName,
    Description,
}

#[derive(Iden)]
enum Cards {
    Table,
    GameModeId,
    Title,
    Content,
    Points,
    Difficulty,
    TimerSeconds,
}

struct SeedMode {
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    cards: &'static [SeedCard],
}

struct SeedCard {
    title: &'static str,
    content: &'static str,
    points: i32,
    difficulty: i32,
    timer_seconds: Option<i32>,
}

const fn card(title: &'static str, content: &'static str, points: i32, difficulty: i32) -> SeedCard {
    SeedCard {
        title,
        content,
        points,
        difficulty,
        timer_seconds: None,
    }
}

const fn timed(title: &'static str, content: &'static str, points: i32, difficulty: i32, timer: i32) -> SeedCard {
    SeedCard {
        title,
        content,
        points,
        difficulty,
        timer_seconds: Some(timer),
    }
}

const SEED: &[SeedMode] = &[
    SeedMode {
        slug: "truth_or_dare",
        name: "Truth or Dare",
        description: "Answer honestly or take the dare.",
        cards: &[
            card("Truth", "What is the most embarrassing song on your playlist?", 1, 1),
            card("Dare", "Do your best impression of another player until your next turn.", 2, 1),
            card("Truth", "Who in this room would you call at 3am?", 1, 1),
            card("Dare", "Speak only in questions for the next two rounds.", 3, 2),
        ],
    },
    SeedMode {
        slug: "most_likely",
        name: "Most Likely To",
        description: "Everyone votes for the player who fits best.",
        cards: &[
            card("Most likely", "...to get lost in their own neighbourhood?", 1, 1),
            card("Most likely", "...to become famous?", 1, 1),
            card("Most likely", "...to forget a friend's birthday?", 1, 2),
        ],
    },
    SeedMode {
        slug: "never_have_i",
        name: "Never Have I Ever",
        description: "Admit it or pass.",
        cards: &[
            card("Never have I ever", "...fallen asleep in a cinema.", 1, 1),
            card("Never have I ever", "...sent a message to the wrong person.", 1, 1),
            card("Never have I ever", "...pretended to know a song I did not know.", 1, 1),
        ],
    },
    SeedMode {
        slug: "two_truths_lie",
        name: "Two Truths and a Lie",
        description: "Tell three statements; the others find the lie.",
        cards: &[
            card("Two truths and a lie", "Tell two true facts and one lie about your childhood.", 2, 1),
            card("Two truths and a lie", "Tell two true facts and one lie about your travels.", 2, 1),
        ],
    },
    SeedMode {
        slug: "trivia",
        name: "Trivia",
        description: "Answer the question.",
        cards: &[
            card("Trivia", "What is the capital of Australia?", 2, 1),
            card("Trivia", "How many hearts does an octopus have?", 3, 2),
            card("Trivia", "Which planet has the most moons?", 3, 2),
        ],
    },
    SeedMode {
        slug: "hot_potato",
        name: "Hot Potato",
        description: "Pass it on before it explodes.",
        cards: &[
            timed("Hot potato", "Name a fruit, then pass.", 1, 1, 20),
            timed("Hot potato", "Name a capital city, then pass.", 1, 1, 15),
            timed("Hot potato", "Name a movie with a number in the title, then pass.", 2, 2, 30),
        ],
    },
    SeedMode {
        slug: "taboo",
        name: "Taboo",
        description: "Describe the word without the forbidden ones.",
        cards: &[
            timed("Taboo", "Pizza (forbidden: cheese, Italy, slice)", 2, 1, 60),
            timed("Taboo", "Beach (forbidden: sand, sea, sun)", 2, 1, 60),
            timed("Taboo", "Guitar (forbidden: strings, music, play)", 3, 2, 60),
        ],
    },
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = manager.get_database_backend();

        for mode in SEED {
            let insert_mode = Query::insert()
                .into_table(GameModes::Table)
                .columns([GameModes::Slug, GameModes::DisplayName, GameModes::Description])
                .values_panic([mode.slug.into(), mode.name.into(), mode.description.into()])
                .to_owned();
            db.execute(backend.build(&insert_mode)).await?;

            let lookup = Query::select()
                .column(GameModes::Id)
                .from(GameModes::Table)
                .and_where(Expr::col(GameModes::Slug).eq(mode.slug))
                .to_owned();
            let row = db
                .query_one(backend.build(&lookup))
                .await?
                .ok_or_else(|| DbErr::RecordNotFound(format!("seeded mode {}", mode.slug)))?;
            let mode_id: i64 = row.try_get("", "id")?;

            for c in mode.cards {
                let insert_card = Query::insert()
                    .into_table(Cards::Table)
                    .columns([
                        Cards::GameModeId,
                        Cards::Title,
                        Cards::Content,
                        Cards::Points,
                        Cards::Difficulty,
                        Cards::TimerSeconds,
                    ])
                    .values_panic([
                        mode_id.into(),
                        c.title.into(),
                        c.content.into(),
                        c.points.into(),
                        c.difficulty.into(),
                        c.timer_seconds.into(),
                    ])
                    .to_owned();
                db.execute(backend.build(&insert_card)).await?;
            }
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute(Statement::from_string(
            manager.get_database_backend(),
            "DELETE FROM cards",
        ))
        .await?;
        db.execute(Statement::from_string(
            manager.get_database_backend(),
            "DELETE FROM game_modes",
        ))
        .await?;
        Ok(())
    }
}
