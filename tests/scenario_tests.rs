//! End-to-end scenarios over the real HTTP surface, exercising the night
//! resolver, vote tally, attrition reset, and win evaluator.

mod test_helpers;

use serde_json::{json, Value};
use test_helpers::test_app;

async fn create_session(app: &axum_test::TestServer, host_name: &str) -> (String, String, String) {
    let response = app
        .post("/sessions")
        .json(&json!({"host_name": host_name, "client_id": "host-client"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    (
        body["session_id"].as_str().unwrap().to_string(),
        body["join_code"].as_str().unwrap().to_string(),
        body["host_participant_id"].as_str().unwrap().to_string(),
    )
}

async fn join(app: &axum_test::TestServer, join_code: &str, client_id: &str, name: &str) -> String {
    let response = app
        .post("/sessions/join")
        .json(&json!({"join_code": join_code, "display_name": name, "client_id": client_id}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["participant_id"].as_str().unwrap().to_string()
}

async fn command(
    app: &axum_test::TestServer,
    session_id: &str,
    client_id: &str,
    action: &str,
    data: Value,
) -> Value {
    let response = app
        .post(&format!("/sessions/{session_id}/commands"))
        .json(&json!({"action": action, "client_id": client_id, "data": data}))
        .await;
    response.assert_status_ok();
    response.json()
}

fn find_by_role<'a>(view: &'a Value, role: &str) -> Option<&'a Value> {
    view["participants"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["role"] == role)
}

fn client_of(clients: &[(String, String)], participant_id: &str) -> String {
    clients
        .iter()
        .find(|(_, id)| id == participant_id)
        .unwrap()
        .0
        .clone()
}

/// Wakes the freshly-entered `night_wolf` phase in place, then advances
/// through `night_doctor` into `night_police` (three `next_phase` calls).
async fn wake_and_advance_to_night_police(app: &axum_test::TestServer, session_id: &str) {
    command(app, session_id, "host-client", "next_phase", json!({})).await;
    command(app, session_id, "host-client", "next_phase", json!({})).await;
    command(app, session_id, "host-client", "next_phase", json!({})).await;
}

/// Single wolf, doctor saves the wolf's target: nobody dies, and police
/// correctly reports the inspected villager as not a werewolf.
#[tokio::test]
async fn s1_single_wolf_doctor_saves_target() {
    let app = test_app();
    let (session_id, join_code, _host_pid) = create_session(&app, "Host").await;

    let mut clients = Vec::new();
    for i in 0..6 {
        let client_id = format!("client-{i}");
        let pid = join(&app, &join_code, &client_id, &format!("Player {i}")).await;
        clients.push((client_id, pid));
    }

    let assign_response = command(&app, &session_id, "host-client", "assign_roles", json!({})).await;
    let host_view = assign_response["view"].clone();

    let wolf_pid = find_by_role(&host_view, "werewolf").unwrap()["id"].as_str().unwrap().to_string();
    let doctor_pid = find_by_role(&host_view, "doctor").unwrap()["id"].as_str().unwrap().to_string();
    let police_pid = find_by_role(&host_view, "police").unwrap()["id"].as_str().unwrap().to_string();
    let villagers: Vec<String> = host_view["participants"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["role"] == "villager")
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    let v1 = villagers[0].clone();
    let v2 = villagers[1].clone();

    let wolf_client = client_of(&clients, &wolf_pid);
    let doctor_client = client_of(&clients, &doctor_pid);
    let police_client = client_of(&clients, &police_pid);

    command(&app, &session_id, "host-client", "next_phase", json!({})).await; // wake night_wolf
    command(&app, &session_id, &wolf_client, "wolf_select", json!({"targetId": v1})).await;

    command(&app, &session_id, "host-client", "next_phase", json!({})).await; // -> night_doctor
    command(&app, &session_id, &doctor_client, "doctor_save", json!({"targetId": v1})).await;

    command(&app, &session_id, "host-client", "next_phase", json!({})).await; // -> night_police
    let police_result = command(
        &app,
        &session_id,
        &police_client,
        "police_inspect",
        json!({"targetId": v2}),
    )
    .await;
    assert_eq!(
        police_result["view"]["round_state"]["police_inspect_result"],
        json!("not_werewolf")
    );

    let reveal = command(&app, &session_id, "host-client", "reveal_dead", json!({})).await;
    let view = reveal["view"].clone();
    assert_eq!(view["phase"], json!("reveal"));
    assert_eq!(view["round_state"]["resolved_deaths"], json!([]));

    let v1_alive = view["participants"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == v1)
        .unwrap()["alive"]
        .as_bool()
        .unwrap();
    assert!(v1_alive);
}

/// Two wolves pick two distinct targets, doctor saves only one -> the
/// unsaved target dies.
#[tokio::test]
async fn s2_two_wolves_two_targets_doctor_saves_one() {
    let app = test_app();
    let (session_id, join_code, _host_pid) = create_session(&app, "Host").await;

    let mut clients = Vec::new();
    for i in 0..9 {
        let client_id = format!("client-{i}");
        let pid = join(&app, &join_code, &client_id, &format!("Player {i}")).await;
        clients.push((client_id, pid));
    }

    let assign_response = command(&app, &session_id, "host-client", "assign_roles", json!({})).await;
    let host_view = assign_response["view"].clone();

    let wolf_pids: Vec<String> = host_view["participants"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["role"] == "werewolf")
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(wolf_pids.len(), 2);
    let doctor_pid = find_by_role(&host_view, "doctor").unwrap()["id"].as_str().unwrap().to_string();
    let villagers: Vec<String> = host_view["participants"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["role"] == "villager")
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    let v1 = villagers[0].clone();
    let v2 = villagers[1].clone();

    let doctor_client = client_of(&clients, &doctor_pid);
    let w1_client = client_of(&clients, &wolf_pids[0]);
    let w2_client = client_of(&clients, &wolf_pids[1]);

    command(&app, &session_id, "host-client", "next_phase", json!({})).await; // wake night_wolf
    command(&app, &session_id, &w1_client, "wolf_select", json!({"targetId": v1})).await;
    command(&app, &session_id, &w2_client, "wolf_select", json!({"targetId": v2})).await;

    command(&app, &session_id, "host-client", "next_phase", json!({})).await; // -> night_doctor
    command(&app, &session_id, &doctor_client, "doctor_save", json!({"targetId": v1})).await;

    command(&app, &session_id, "host-client", "next_phase", json!({})).await; // -> night_police
    let reveal = command(&app, &session_id, "host-client", "reveal_dead", json!({})).await;
    let view = reveal["view"].clone();
    assert_eq!(view["round_state"]["resolved_deaths"], json!([v2]));
    assert_eq!(view["phase"], json!("reveal"));

    let alive_of = |id: &str| -> bool {
        view["participants"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["id"] == id)
            .unwrap()["alive"]
            .as_bool()
            .unwrap()
    };
    assert!(alive_of(&v1));
    assert!(!alive_of(&v2));
}

/// Two wolves target the same victim, doctor saves someone else -> the
/// shared target dies.
#[tokio::test]
async fn s3_two_wolves_same_target_no_save_dies() {
    let app = test_app();
    let (session_id, join_code, _host_pid) = create_session(&app, "Host").await;

    let mut clients = Vec::new();
    for i in 0..9 {
        let client_id = format!("client-{i}");
        let pid = join(&app, &join_code, &client_id, &format!("Player {i}")).await;
        clients.push((client_id, pid));
    }

    let assign_response = command(&app, &session_id, "host-client", "assign_roles", json!({})).await;
    let host_view = assign_response["view"].clone();

    let wolf_pids: Vec<String> = host_view["participants"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["role"] == "werewolf")
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(wolf_pids.len(), 2);
    let doctor_pid = find_by_role(&host_view, "doctor").unwrap()["id"].as_str().unwrap().to_string();
    let villagers: Vec<String> = host_view["participants"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["role"] == "villager")
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    let v1 = villagers[0].clone();
    let v3 = villagers[1].clone();

    let doctor_client = client_of(&clients, &doctor_pid);

    command(&app, &session_id, "host-client", "next_phase", json!({})).await; // wake night_wolf
    for wolf_pid in &wolf_pids {
        let wolf_client = client_of(&clients, wolf_pid);
        command(&app, &session_id, &wolf_client, "wolf_select", json!({"targetId": v1})).await;
    }

    command(&app, &session_id, "host-client", "next_phase", json!({})).await; // -> night_doctor
    command(&app, &session_id, &doctor_client, "doctor_save", json!({"targetId": v3})).await;

    command(&app, &session_id, "host-client", "next_phase", json!({})).await; // -> night_police
    let reveal = command(&app, &session_id, "host-client", "reveal_dead", json!({})).await;
    let view = reveal["view"].clone();
    assert_eq!(view["round_state"]["resolved_deaths"], json!([v1]));
    let v1_alive = view["participants"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == v1)
        .unwrap()["alive"]
        .as_bool()
        .unwrap();
    assert!(!v1_alive);
}

/// A tied final vote elects nobody and advances the round.
#[tokio::test]
async fn s4_tied_final_vote_yields_no_elimination() {
    let app = test_app();
    let (session_id, join_code, _host_pid) = create_session(&app, "Host").await;

    let mut clients = Vec::new();
    for i in 0..6 {
        let client_id = format!("client-{i}");
        let pid = join(&app, &join_code, &client_id, &format!("Player {i}")).await;
        clients.push((client_id, pid));
    }

    command(&app, &session_id, "host-client", "assign_roles", json!({})).await;
    wake_and_advance_to_night_police(&app, &session_id).await;
    let reveal = command(&app, &session_id, "host-client", "reveal_dead", json!({})).await;
    assert_eq!(reveal["view"]["phase"], json!("reveal"));
    command(&app, &session_id, "host-client", "begin_voting", json!({})).await;
    let final_vote = command(&app, &session_id, "host-client", "final_vote", json!({})).await;
    assert_eq!(final_vote["view"]["phase"], json!("day_final_vote"));

    let v1 = clients[0].1.clone();
    let v2 = clients[1].1.clone();

    command(&app, &session_id, &clients[0].0, "vote", json!({"targetId": v1})).await;
    command(&app, &session_id, &clients[1].0, "vote", json!({"targetId": v1})).await;
    command(&app, &session_id, &clients[2].0, "vote", json!({"targetId": v2})).await;
    command(&app, &session_id, &clients[3].0, "vote", json!({"targetId": v2})).await;

    let before_day_count = final_vote["view"]["day_count"].as_u64().unwrap();
    let outcome = command(&app, &session_id, "host-client", "eliminate_player", json!({})).await;
    assert_eq!(outcome["outcome"], json!("no_elimination"));
    assert_eq!(outcome["view"]["phase"], json!("night_wolf"));
    assert_eq!(outcome["view"]["day_count"].as_u64().unwrap(), before_day_count + 1);
    for (_, participant_id) in &clients {
        let alive = outcome["view"]["participants"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["id"] == *participant_id)
            .unwrap()["alive"]
            .as_bool()
            .unwrap();
        assert!(alive);
    }
}

/// Removing a participant that drops the non-host count below 6 resets
/// the session to lobby.
#[tokio::test]
async fn s5_attrition_reset_during_game() {
    let app = test_app();
    let (session_id, join_code, _host_pid) = create_session(&app, "Host").await;

    let mut clients = Vec::new();
    for i in 0..6 {
        let client_id = format!("client-{i}");
        let pid = join(&app, &join_code, &client_id, &format!("Player {i}")).await;
        clients.push((client_id, pid));
    }

    command(&app, &session_id, "host-client", "assign_roles", json!({})).await;
    command(&app, &session_id, "host-client", "next_phase", json!({})).await; // wake night_wolf

    let removed = clients[0].1.clone();
    let outcome = command(
        &app,
        &session_id,
        "host-client",
        "remove_player",
        json!({"participantId": removed}),
    )
    .await;
    let view = outcome["view"].clone();
    assert_eq!(view["phase"], json!("lobby"));
    assert_eq!(view["day_count"], json!(0));
    for participant in view["participants"].as_array().unwrap() {
        if participant["is_host"] == json!(false) {
            assert_eq!(participant["role"], json!("none"));
            assert_eq!(participant["alive"], json!(true));
        }
    }
}

/// Reducing alive non-hosts to a final two with a surviving werewolf
/// ends the game with a werewolf win. Driven entirely by unanimous day
/// elimination votes, so no wolf/doctor/police selection shapes who dies.
#[tokio::test]
async fn s6_win_by_final_two() {
    let app = test_app();
    let (session_id, join_code, _host_pid) = create_session(&app, "Host").await;

    let mut clients = Vec::new();
    for i in 0..6 {
        let client_id = format!("client-{i}");
        let pid = join(&app, &join_code, &client_id, &format!("Player {i}")).await;
        clients.push((client_id, pid));
    }

    let assign_response = command(&app, &session_id, "host-client", "assign_roles", json!({})).await;
    let host_view = assign_response["view"].clone();
    let wolf_pid = find_by_role(&host_view, "werewolf").unwrap()["id"].as_str().unwrap().to_string();
    let doctor_pid = find_by_role(&host_view, "doctor").unwrap()["id"].as_str().unwrap().to_string();
    let police_pid = find_by_role(&host_view, "police").unwrap()["id"].as_str().unwrap().to_string();
    let villagers: Vec<String> = host_view["participants"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["role"] == "villager")
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();

    // Eliminating these four one per day-round leaves exactly {wolf, v3}
    // alive, a werewolf-favored final two.
    let eliminations = [doctor_pid, police_pid, villagers[0].clone(), villagers[1].clone()];
    let mut already_eliminated: Vec<String> = Vec::new();
    let mut last_outcome = Value::Null;

    for target in &eliminations {
        wake_and_advance_to_night_police(&app, &session_id).await;
        command(&app, &session_id, "host-client", "reveal_dead", json!({})).await;
        command(&app, &session_id, "host-client", "begin_voting", json!({})).await;
        command(&app, &session_id, "host-client", "final_vote", json!({})).await;

        for (client_id, pid) in &clients {
            if already_eliminated.contains(pid) {
                continue;
            }
            command(&app, &session_id, client_id, "vote", json!({"targetId": target})).await;
        }

        last_outcome = command(&app, &session_id, "host-client", "eliminate_player", json!({})).await;
        already_eliminated.push(target.clone());
    }

    assert_eq!(last_outcome["view"]["phase"], json!("ended"));
    assert_eq!(last_outcome["view"]["win_state"], json!("werewolves"));
    let wolf_alive = last_outcome["view"]["participants"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == wolf_pid)
        .unwrap()["alive"]
        .as_bool()
        .unwrap();
    assert!(wolf_alive);
}
