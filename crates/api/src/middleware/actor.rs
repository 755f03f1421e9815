//! Actor context resolution middleware.
//!
//! Authentication and token issuance live in front of this service; the
//! gateway forwards the verified identity as headers. This middleware is the
//! single place that turns those headers into an [`Actor`], which it stores
//! in request extensions for every downstream handler. Requests without a
//! resolvable identity are rejected before any handler runs.

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use domain::models::{Actor, Role};

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated role (EMPLOYEE / ADMIN / OWNER).
pub const USER_ROLE_HEADER: &str = "x-user-role";
/// Header carrying the employee's home warehouse id, when assigned.
pub const WAREHOUSE_ID_HEADER: &str = "x-warehouse-id";

/// Middleware that resolves the actor context once per inbound call.
pub async fn require_actor(mut req: Request<Body>, next: Next) -> Response {
    match resolve_actor(req.headers()) {
        Ok(actor) => {
            req.extensions_mut().insert(actor);
            next.run(req).await
        }
        Err(reason) => unauthorized_response(reason),
    }
}

/// Parses the identity headers into an [`Actor`].
fn resolve_actor(headers: &HeaderMap) -> Result<Actor, &'static str> {
    let user_id = header_str(headers, USER_ID_HEADER)
        .ok_or("Missing user identity header")?
        .parse::<i64>()
        .map_err(|_| "Invalid user id header")?;
    if user_id <= 0 {
        return Err("Invalid user id header");
    }

    let role = header_str(headers, USER_ROLE_HEADER)
        .ok_or("Missing role header")?
        .parse::<Role>()
        .map_err(|_| "Invalid role header")?;

    let warehouse_id = match header_str(headers, WAREHOUSE_ID_HEADER) {
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| "Invalid warehouse header")?),
        None => None,
    };

    Ok(Actor {
        user_id,
        role,
        warehouse_id,
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(entries: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in entries {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn resolves_employee_with_warehouse() {
        let actor = resolve_actor(&headers(&[
            (USER_ID_HEADER, "7"),
            (USER_ROLE_HEADER, "EMPLOYEE"),
            (WAREHOUSE_ID_HEADER, "2"),
        ]))
        .unwrap();
        assert_eq!(actor.user_id, 7);
        assert_eq!(actor.role, Role::Employee);
        assert_eq!(actor.warehouse_id, Some(2));
    }

    #[test]
    fn warehouse_header_is_optional() {
        let actor = resolve_actor(&headers(&[
            (USER_ID_HEADER, "3"),
            (USER_ROLE_HEADER, "OWNER"),
        ]))
        .unwrap();
        assert_eq!(actor.role, Role::Owner);
        assert_eq!(actor.warehouse_id, None);
    }

    #[test]
    fn missing_or_malformed_identity_is_rejected() {
        assert!(resolve_actor(&headers(&[(USER_ROLE_HEADER, "ADMIN")])).is_err());
        assert!(resolve_actor(&headers(&[
            (USER_ID_HEADER, "0"),
            (USER_ROLE_HEADER, "ADMIN"),
        ]))
        .is_err());
        assert!(resolve_actor(&headers(&[
            (USER_ID_HEADER, "5"),
            (USER_ROLE_HEADER, "SUPERVISOR"),
        ]))
        .is_err());
        assert!(resolve_actor(&headers(&[
            (USER_ID_HEADER, "5"),
            (USER_ROLE_HEADER, "EMPLOYEE"),
            (WAREHOUSE_ID_HEADER, "not-a-number"),
        ]))
        .is_err());
    }
}
