use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use serde_json::json;
use yacht_engine::api::{decide_request, Request};
use yacht_engine::play::{play_turn, TurnConfig};
use yacht_engine::Dice;

const VERSION: &str = concat!("yacht-ffi ", env!("CARGO_PKG_VERSION"));

fn ok(value: serde_json::Value) -> String {
    json!({ "ok": true, "result": value }).to_string()
}

fn err(e: impl std::fmt::Display) -> String {
    json!({ "ok": false, "error": e.to_string() }).to_string()
}

fn to_jstring(env: &JNIEnv, payload: String) -> jstring {
    match env.new_string(payload) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn with_input(env: &mut JNIEnv, json: &JString, f: impl FnOnce(&str) -> String) -> jstring {
    let payload = match env.get_string(json) {
        Ok(s) => f(&String::from(s)),
        Err(e) => err(e),
    };
    to_jstring(env, payload)
}

/// Decision request JSON → `{"ok":true,"result":{"decision":...}}`.
pub fn decide_json_internal(input: &str) -> String {
    let request: Request = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => return err(format!("invalid_request: {}", e)),
    };
    match decide_request(&request) {
        Ok(response) => match serde_json::to_value(response) {
            Ok(v) => ok(v),
            Err(e) => err(e),
        },
        Err(e) => err(e),
    }
}

/// Turn config JSON (`{"seed":1,"open":["yacht"]}`) → turn trace envelope.
pub fn play_turn_json_internal(input: &str) -> String {
    let cfg: TurnConfig = match serde_json::from_str(input) {
        Ok(c) => c,
        Err(e) => return err(format!("invalid_config: {}", e)),
    };
    let mut dice = Dice::from_seed(cfg.seed);
    match play_turn(&mut dice, &cfg.open_categories()) {
        Ok(trace) => match serde_json::to_value(trace) {
            Ok(v) => ok(v),
            Err(e) => err(e),
        },
        Err(e) => err(e),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_yacht_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    to_jstring(&env, VERSION.to_string())
}

#[no_mangle]
pub extern "system" fn Java_com_yacht_Ffi_decideJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    with_input(&mut env, &json, decide_json_internal)
}

#[no_mangle]
pub extern "system" fn Java_com_yacht_Ffi_playTurnJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    with_input(&mut env, &json, play_turn_json_internal)
}
