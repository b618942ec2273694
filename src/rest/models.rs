// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Request and response bodies of the REST bridge.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{EffectId, ResultCode};

/// The answer to session creation. A refused session carries only `result`.
#[derive(Debug, Deserialize)]
pub(super) struct InitResponse {
    #[serde(default)]
    pub sessionid: Option<i64>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub result: Option<ResultCode>,
}

/// The answer to every effect call.
///
/// `id` may be absent or null; that is only a problem when an effect was
/// expected back.
#[derive(Debug, Deserialize)]
pub(super) struct SdkResponse {
    pub result: ResultCode,
    #[serde(default)]
    pub id: Option<EffectId>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HeartbeatResponse {
    pub tick: u64,
}

#[derive(Debug, Serialize)]
pub(super) struct EffectRequest {
    pub effect: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(super) struct IdRequest {
    pub id: EffectId,
}

/// Pulls a result code out of an error body, if the bridge sent one.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub result: ResultCode,
}
