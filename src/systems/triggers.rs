//! Portal triggers
//!
//! The body tagged `Player` overlapping a portal body (box test on the
//! averaged transform scales) reports the portal's target level. The editor
//! performs the level load; nothing here moves bodies.

use serde::Serialize;

use crate::domain::Body;

pub const PLAYER_TAG: &str = "Player";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalTrigger {
    pub player_id: String,
    pub portal_id: String,
    pub target_level_id: String,
}

/// Collect every portal the player currently overlaps into `out`
pub fn detect_portals(bodies: &[Body], out: &mut Vec<PortalTrigger>) {
    out.clear();
    let Some(player) = bodies.iter().find(|b| b.tag == PLAYER_TAG) else {
        return;
    };

    let pp = &player.transform.position;
    let ps = &player.transform.scale;

    for portal in bodies.iter().filter(|b| b.is_portal && b.id != player.id) {
        let Some(target) = portal.target_level_id.as_deref() else {
            continue;
        };
        let qp = &portal.transform.position;
        let qs = &portal.transform.scale;

        let overlaps = (pp.x - qp.x).abs() < (ps.x + qs.x) / 2.0
            && (pp.y - qp.y).abs() < (ps.y + qs.y) / 2.0
            && (pp.z - qp.z).abs() < (ps.z + qs.z) / 2.0;

        if overlaps {
            out.push(PortalTrigger {
                player_id: player.id.clone(),
                portal_id: portal.id.clone(),
                target_level_id: target.to_string(),
            });
        }
    }
}
