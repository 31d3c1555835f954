//! Projection of stat.ink battle objects into flat documents

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

const XMATCH_LOBBY: &str = "xmatch";

/// Side a player fought on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    My,
    Their,
}

/// Per-player stats kept from a battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub weapon_key: Option<String>,
    pub weapon_name: Option<String>,
    pub kill: Option<i64>,
    pub assist: Option<i64>,
    pub kill_or_assist: Option<i64>,
    pub death: Option<i64>,
    pub special: Option<i64>,
    pub inked: Option<i64>,
    pub is_me: bool,
    pub team: Team,
}

/// Flat battle document, keyed by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatBattle {
    pub id: String,
    pub url: Option<String>,
    pub end_at: Option<String>,
    pub result: Option<String>,
    pub knockout: Option<bool>,

    pub lobby: Option<String>,
    pub rule_key: Option<String>,
    pub rule_name: Option<String>,
    pub stage_name: Option<String>,

    // Stats of the uploading player, kept top-level for dashboards
    pub kill: Option<i64>,
    pub assist: Option<i64>,
    pub death: Option<i64>,
    pub special_count: Option<i64>,
    pub inked: Option<i64>,

    pub weapon_key: Option<String>,
    pub weapon_name: Option<String>,
    pub sub_weapon: Option<String>,
    pub special_weapon: Option<String>,

    pub x_power_before: Option<f64>,
    pub x_power_after: Option<f64>,
    pub rank_before: Option<Value>,
    pub rank_after: Option<Value>,

    pub medals: Vec<Value>,
    pub players: Vec<PlayerStats>,
}

fn str_at(value: &Value, pointer: &str) -> Option<String> {
    value.pointer(pointer).and_then(Value::as_str).map(str::to_string)
}

fn int_at(value: &Value, pointer: &str) -> Option<i64> {
    value.pointer(pointer).and_then(Value::as_i64)
}

fn float_at(value: &Value, pointer: &str) -> Option<f64> {
    value.pointer(pointer).and_then(Value::as_f64)
}

fn present_at(value: &Value, pointer: &str) -> Option<Value> {
    value.pointer(pointer).filter(|v| !v.is_null()).cloned()
}

fn player_stats(member: &Value, is_me: bool, team: Team) -> PlayerStats {
    PlayerStats {
        weapon_key: str_at(member, "/weapon/key"),
        weapon_name: str_at(member, "/weapon/name/en_US"),
        kill: int_at(member, "/kill"),
        assist: int_at(member, "/assist"),
        kill_or_assist: int_at(member, "/kill_or_assist"),
        death: int_at(member, "/death"),
        special: int_at(member, "/special"),
        inked: int_at(member, "/inked"),
        is_me,
        team,
    }
}

fn members<'a>(battle: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    battle
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

/// Flatten a single stat.ink battle
///
/// The battle's `uuid` becomes the document id; a battle without one is
/// rejected because it could not be upserted.
pub fn flatten_battle(battle: &Value) -> Result<FlatBattle> {
    if !battle.is_object() {
        return Err(Error::InvalidPayload(format!(
            "expected a battle object, got {}",
            battle
        )));
    }
    let id = str_at(battle, "/uuid").ok_or(Error::MissingField("uuid"))?;

    let mut players: Vec<PlayerStats> = members(battle, "our_team_members")
        .map(|m| {
            let is_me = m.get("me").and_then(Value::as_bool).unwrap_or(false);
            player_stats(m, is_me, Team::My)
        })
        .collect();
    players.extend(members(battle, "their_team_members").map(|m| player_stats(m, false, Team::Their)));

    debug!("Flattened battle {} with {} players", id, players.len());

    Ok(FlatBattle {
        id,
        url: str_at(battle, "/url"),
        end_at: str_at(battle, "/end_at/iso8601"),
        result: str_at(battle, "/result"),
        knockout: battle.get("knockout").and_then(Value::as_bool),

        lobby: str_at(battle, "/lobby/key"),
        rule_key: str_at(battle, "/rule/key"),
        rule_name: str_at(battle, "/rule/name/en_US"),
        stage_name: str_at(battle, "/stage/name/en_US"),

        kill: int_at(battle, "/kill"),
        assist: int_at(battle, "/assist"),
        death: int_at(battle, "/death"),
        special_count: int_at(battle, "/special"),
        inked: int_at(battle, "/inked"),

        weapon_key: str_at(battle, "/weapon/key"),
        weapon_name: str_at(battle, "/weapon/name/en_US"),
        sub_weapon: str_at(battle, "/weapon/sub/name/en_US"),
        special_weapon: str_at(battle, "/weapon/special/name/en_US"),

        x_power_before: float_at(battle, "/x_power_before"),
        x_power_after: float_at(battle, "/x_power_after"),
        rank_before: present_at(battle, "/rank_before"),
        rank_after: present_at(battle, "/rank_after"),

        medals: battle
            .get("medals")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        players,
    })
}

/// Flatten a list of battles
pub fn flatten_battles(battles: &[Value]) -> Result<Vec<FlatBattle>> {
    battles.iter().map(flatten_battle).collect()
}

/// Keep only X Match battles
pub fn retain_xmatch(battles: Vec<Value>) -> Vec<Value> {
    let total = battles.len();
    let kept: Vec<Value> = battles
        .into_iter()
        .filter(|b| b.pointer("/lobby/key").and_then(Value::as_str) == Some(XMATCH_LOBBY))
        .collect();

    if kept.len() < total {
        warn!("Discarding {} non-X battles", total - kept.len());
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_battle() -> Value {
        json!({
            "uuid": "0b8a7c1e-4a39-4f1a-9e5c-1d2f3a4b5c6d",
            "url": "https://stat.ink/@someone/spl3/0b8a7c1e",
            "end_at": { "iso8601": "2026-10-17T21:14:03+09:00" },
            "result": "win",
            "knockout": true,
            "lobby": { "key": "xmatch" },
            "rule": { "key": "area", "name": { "en_US": "Splat Zones" } },
            "stage": { "name": { "en_US": "Scorch Gorge" } },
            "kill": 7,
            "assist": 2,
            "death": 3,
            "special": 4,
            "inked": 1234,
            "weapon": {
                "key": "sshooter",
                "name": { "en_US": "Splattershot" },
                "sub": { "name": { "en_US": "Suction Bomb" } },
                "special": { "name": { "en_US": "Trizooka" } }
            },
            "x_power_before": 2187.3,
            "x_power_after": 2201.8,
            "rank_before": null,
            "medals": [{ "key": "gold" }],
            "our_team_members": [
                { "me": true, "kill": 7, "weapon": { "key": "sshooter", "name": { "en_US": "Splattershot" } } },
                { "me": false, "kill": 3 }
            ],
            "their_team_members": [
                { "me": true, "kill": 5, "death": 6 }
            ]
        })
    }

    #[test]
    fn test_flatten_battle() {
        let flat = flatten_battle(&sample_battle()).unwrap();

        assert_eq!(flat.id, "0b8a7c1e-4a39-4f1a-9e5c-1d2f3a4b5c6d");
        assert_eq!(flat.end_at.as_deref(), Some("2026-10-17T21:14:03+09:00"));
        assert_eq!(flat.knockout, Some(true));
        assert_eq!(flat.rule_key.as_deref(), Some("area"));
        assert_eq!(flat.rule_name.as_deref(), Some("Splat Zones"));
        assert_eq!(flat.stage_name.as_deref(), Some("Scorch Gorge"));
        assert_eq!(flat.special_count, Some(4));
        assert_eq!(flat.sub_weapon.as_deref(), Some("Suction Bomb"));
        assert_eq!(flat.special_weapon.as_deref(), Some("Trizooka"));
        assert_eq!(flat.x_power_after, Some(2201.8));
        assert_eq!(flat.rank_before, None);
        assert_eq!(flat.medals.len(), 1);
    }

    #[test]
    fn test_players_ordered_by_team() {
        let flat = flatten_battle(&sample_battle()).unwrap();

        let teams: Vec<Team> = flat.players.iter().map(|p| p.team).collect();
        assert_eq!(teams, vec![Team::My, Team::My, Team::Their]);

        assert!(flat.players[0].is_me);
        assert_eq!(flat.players[0].weapon_name.as_deref(), Some("Splattershot"));
        assert!(!flat.players[1].is_me);
        // Opponents are never "me", whatever the payload says
        assert!(!flat.players[2].is_me);
    }

    #[test]
    fn test_sparse_battle() {
        let flat = flatten_battle(&json!({ "uuid": "abc" })).unwrap();
        assert_eq!(flat.id, "abc");
        assert_eq!(flat.result, None);
        assert!(flat.players.is_empty());
        assert!(flat.medals.is_empty());
    }

    #[test]
    fn test_missing_uuid() {
        let err = flatten_battle(&json!({ "result": "lose" })).unwrap_err();
        assert!(matches!(err, Error::MissingField("uuid")));
    }

    #[test]
    fn test_not_an_object() {
        let err = flatten_battle(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::InvalidPayload(_)));
    }

    #[test]
    fn test_retain_xmatch() {
        let battles = vec![
            json!({ "uuid": "a", "lobby": { "key": "xmatch" } }),
            json!({ "uuid": "b", "lobby": { "key": "bankara_open" } }),
            json!({ "uuid": "c" }),
        ];
        let kept = retain_xmatch(battles);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0]["uuid"], "a");
    }

    #[test]
    fn test_team_serialization() {
        assert_eq!(serde_json::to_string(&Team::My).unwrap(), "\"my\"");
        assert_eq!(serde_json::to_string(&Team::Their).unwrap(), "\"their\"");
    }
}
