//! SQLite persistence for teams and participants.
//!
//! Every public call is a single synchronous round-trip that commits
//! independently; the one multi-statement operation (`reassign_roster`)
//! runs inside its own transaction.

use rusqlite::{params, Connection};
use std::path::Path;

use crate::model::{Participant, Team, FREE_AGENT_TEAM_ID};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS teams (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS participants (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    birth_date TEXT,
    team_id INTEGER REFERENCES teams(id)
);
CREATE INDEX IF NOT EXISTS idx_participants_team ON participants(team_id);
";

/// Sample participants, in seeding order. The first 25 fill the sample
/// teams round-robin; the rest start as free agents.
const SEED_PARTICIPANTS: &[(&str, &str, &str)] = &[
    ("Andrew", "Smith", "1992-05-06"),
    ("Brandie", "Jones", "1991-11-09"),
    ("Chuck", "Johnson", "1998-07-23"),
    ("Dorothy", "Walker", "1999-09-06"),
    ("Evan", "Roberts", "1999-12-03"),
    ("Fiona", "Williams", "1999-03-03"),
    ("Greg", "St. Dennis", "1999-02-13"),
    ("Hermoine", "Kemble", "2000-02-23"),
    ("Ian", "Carson", "2000-12-05"),
    ("Janice", "Black", "1999-04-28"),
    ("Kenny", "White", "1995-05-21"),
    ("Lourda", "Grey", "1983-06-11"),
    ("Martin", "Oliver", "1995-01-02"),
    ("Natalie", "Kimmel", "1998-12-22"),
    ("Oscar", "O'Brien", "1995-11-22"),
    ("Patty", "Myers", "1997-03-03"),
    ("Quentin", "Winter", "1999-02-03"),
    ("Rita", "Haskell", "1967-01-29"),
    ("Stuart", "Branch", "1978-11-23"),
    ("Tina", "Harris-Jones", "1979-07-21"),
    ("Ulysse", "Malenfant", "1958-06-06"),
    ("Vicki", "Brown", "1982-04-30"),
    ("Wayne", "Greenstone", "1961-09-12"),
    ("Xaviera", "Sanchez", "1958-04-28"),
    ("Yves", "Belanger", "1971-10-26"),
    ("Zenia", "Barbarrosa", "1965-09-22"),
    ("Dave", "Banwell", "1975-05-28"),
];

const SEED_TEAMS: &[&str] = &[
    "The Aristocrats",
    "Catch Me If You Can",
    "The Dropouts",
    "Down the Rabbit Hole",
    "The Hooligans",
    "Dave's Team",
];

/// Number of seed participants assigned onto teams (the remainder stay in
/// the free-agent pool).
const SEED_ASSIGNED: usize = 25;

pub struct RosterStore {
    conn: Connection,
}

impl RosterStore {
    /// Open or create a roster database at `path`.
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// In-memory store, used by tests and throwaway sessions.
    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> rusqlite::Result<Self> {
        conn.execute_batch(SCHEMA)?;
        // The free-agent pool always occupies row 1.
        conn.execute(
            "INSERT OR IGNORE INTO teams (id, name) VALUES (?1, 'Free Agents')",
            params![FREE_AGENT_TEAM_ID],
        )?;
        Ok(Self { conn })
    }

    pub fn team(&self, id: i64) -> rusqlite::Result<Team> {
        self.conn.query_row(
            "SELECT id, name FROM teams WHERE id = ?1",
            params![id],
            |row| Ok(Team { id: row.get(0)?, name: row.get(1)? }),
        )
    }

    pub fn free_agent_team(&self) -> rusqlite::Result<Team> {
        self.team(FREE_AGENT_TEAM_ID)
    }

    /// All teams, free-agent pool included.
    pub fn teams(&self) -> rusqlite::Result<Vec<Team>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM teams ORDER BY name")?;
        let teams = stmt
            .query_map([], |row| Ok(Team { id: row.get(0)?, name: row.get(1)? }))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(teams)
    }

    /// Teams a user can select and operate on, i.e. everything except the
    /// free-agent pool.
    pub fn competing_teams(&self) -> rusqlite::Result<Vec<Team>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name FROM teams WHERE id != ?1 ORDER BY name",
        )?;
        let teams = stmt
            .query_map(params![FREE_AGENT_TEAM_ID], |row| {
                Ok(Team { id: row.get(0)?, name: row.get(1)? })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(teams)
    }

    pub fn roster_of(&self, team_id: i64) -> rusqlite::Result<Vec<Participant>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, last_name, birth_date, team_id
             FROM participants WHERE team_id = ?1
             ORDER BY last_name, first_name",
        )?;
        let roster = stmt
            .query_map(params![team_id], |row| {
                Ok(Participant {
                    id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    birth_date: row.get(3)?,
                    team_id: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(roster)
    }

    pub fn roster_count(&self, team_id: i64) -> rusqlite::Result<usize> {
        self.conn.query_row(
            "SELECT COUNT(*) FROM participants WHERE team_id = ?1",
            params![team_id],
            |row| row.get::<_, i64>(0).map(|n| n as usize),
        )
    }

    pub fn insert_team(&self, name: &str) -> rusqlite::Result<Team> {
        self.conn
            .execute("INSERT INTO teams (name) VALUES (?1)", params![name])?;
        Ok(Team { id: self.conn.last_insert_rowid(), name: name.to_string() })
    }

    pub fn update_team(&self, team: &Team) -> rusqlite::Result<()> {
        self.conn.execute(
            "UPDATE teams SET name = ?1 WHERE id = ?2",
            params![team.name, team.id],
        )?;
        Ok(())
    }

    pub fn delete_team(&self, team_id: i64) -> rusqlite::Result<()> {
        self.conn
            .execute("DELETE FROM teams WHERE id = ?1", params![team_id])?;
        Ok(())
    }

    pub fn insert_participant(
        &self,
        first_name: &str,
        last_name: &str,
        birth_date: &str,
        team_id: i64,
    ) -> rusqlite::Result<Participant> {
        self.conn.execute(
            "INSERT INTO participants (first_name, last_name, birth_date, team_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![first_name, last_name, birth_date, team_id],
        )?;
        Ok(Participant {
            id: self.conn.last_insert_rowid(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date: birth_date.to_string(),
            team_id,
        })
    }

    pub fn update_participant(&self, participant: &Participant) -> rusqlite::Result<()> {
        self.conn.execute(
            "UPDATE participants
             SET first_name = ?1, last_name = ?2, birth_date = ?3, team_id = ?4
             WHERE id = ?5",
            params![
                participant.first_name,
                participant.last_name,
                participant.birth_date,
                participant.team_id,
                participant.id
            ],
        )?;
        Ok(())
    }

    pub fn delete_participant(&self, id: i64) -> rusqlite::Result<()> {
        self.conn
            .execute("DELETE FROM participants WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Move every participant from one team to another in one transaction.
    /// Returns the number of participants moved.
    pub fn reassign_roster(&mut self, from_team: i64, to_team: i64) -> rusqlite::Result<usize> {
        let tx = self.conn.transaction()?;
        let moved = tx.execute(
            "UPDATE participants SET team_id = ?1 WHERE team_id = ?2",
            params![to_team, from_team],
        )?;
        tx.commit()?;
        Ok(moved)
    }

    /// Wipe the database and load the sample roster. Returns the number of
    /// teams and participants inserted (the free-agent pool not counted).
    pub fn seed(&mut self) -> rusqlite::Result<(usize, usize)> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM participants", [])?;
        tx.execute("DELETE FROM teams WHERE id != ?1", params![FREE_AGENT_TEAM_ID])?;

        let mut team_ids = Vec::with_capacity(SEED_TEAMS.len());
        for name in SEED_TEAMS {
            tx.execute("INSERT INTO teams (name) VALUES (?1)", params![name])?;
            team_ids.push(tx.last_insert_rowid());
        }

        for (i, (first, last, birth)) in SEED_PARTICIPANTS.iter().enumerate() {
            let team_id = if i < SEED_ASSIGNED {
                team_ids[i % 5]
            } else {
                FREE_AGENT_TEAM_ID
            };
            tx.execute(
                "INSERT INTO participants (first_name, last_name, birth_date, team_id)
                 VALUES (?1, ?2, ?3, ?4)",
                params![first, last, birth, team_id],
            )?;
        }

        tx.commit()?;
        Ok((SEED_TEAMS.len(), SEED_PARTICIPANTS.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_bootstraps_free_agent_pool() {
        let store = RosterStore::open_in_memory().unwrap();
        let pool = store.free_agent_team().unwrap();
        assert_eq!(pool.id, FREE_AGENT_TEAM_ID);
        assert_eq!(pool.name, "Free Agents");
        // competing_teams never lists the pool
        assert!(store.competing_teams().unwrap().is_empty());
    }

    #[test]
    fn test_open_on_disk_is_idempotent() {
        let dir = tempdir().unwrap();
        let db = dir.path().join("roster.sqlite");

        let store = RosterStore::open(&db).unwrap();
        store.insert_team("The Dropouts").unwrap();
        drop(store);

        // Reopening must not clobber existing rows or re-insert the pool.
        let store = RosterStore::open(&db).unwrap();
        let teams = store.teams().unwrap();
        assert_eq!(teams.len(), 2);
    }

    #[test]
    fn test_team_crud() {
        let store = RosterStore::open_in_memory().unwrap();
        let mut team = store.insert_team("The Aristocrats").unwrap();

        team.name = "The Autocrats".to_string();
        store.update_team(&team).unwrap();
        assert_eq!(store.team(team.id).unwrap().name, "The Autocrats");

        store.delete_team(team.id).unwrap();
        assert!(store.team(team.id).is_err());
    }

    #[test]
    fn test_participant_crud_and_roster() {
        let store = RosterStore::open_in_memory().unwrap();
        let team = store.insert_team("The Hooligans").unwrap();

        let mut p = store
            .insert_participant("Andrew", "Smith", "1992-05-06", team.id)
            .unwrap();
        assert_eq!(store.roster_count(team.id).unwrap(), 1);

        p.first_name = "Andy".to_string();
        store.update_participant(&p).unwrap();
        let roster = store.roster_of(team.id).unwrap();
        assert_eq!(roster[0].first_name, "Andy");

        store.delete_participant(p.id).unwrap();
        assert_eq!(store.roster_count(team.id).unwrap(), 0);
    }

    #[test]
    fn test_reassign_roster_moves_everyone() {
        let mut store = RosterStore::open_in_memory().unwrap();
        let team = store.insert_team("Down the Rabbit Hole").unwrap();
        for (first, last, birth) in &SEED_PARTICIPANTS[..3] {
            store.insert_participant(first, last, birth, team.id).unwrap();
        }

        let moved = store.reassign_roster(team.id, FREE_AGENT_TEAM_ID).unwrap();
        assert_eq!(moved, 3);
        assert_eq!(store.roster_count(team.id).unwrap(), 0);
        assert_eq!(store.roster_count(FREE_AGENT_TEAM_ID).unwrap(), 3);
    }

    #[test]
    fn test_seed_counts() {
        let mut store = RosterStore::open_in_memory().unwrap();
        let (teams, participants) = store.seed().unwrap();
        assert_eq!(teams, 6);
        assert_eq!(participants, 27);

        // five full teams of five, one empty team, two free agents
        let competing = store.competing_teams().unwrap();
        assert_eq!(competing.len(), 6);
        let full: Vec<_> = competing
            .iter()
            .filter(|t| store.roster_count(t.id).unwrap() == 5)
            .collect();
        assert_eq!(full.len(), 5);
        assert_eq!(store.roster_count(FREE_AGENT_TEAM_ID).unwrap(), 2);
    }

    #[test]
    fn test_seed_is_repeatable() {
        let mut store = RosterStore::open_in_memory().unwrap();
        store.seed().unwrap();
        store.seed().unwrap();
        assert_eq!(store.competing_teams().unwrap().len(), 6);
    }

    #[test]
    fn test_duplicate_team_name_rejected() {
        let store = RosterStore::open_in_memory().unwrap();
        store.insert_team("The Aristocrats").unwrap();
        assert!(store.insert_team("The Aristocrats").is_err());
    }
}
