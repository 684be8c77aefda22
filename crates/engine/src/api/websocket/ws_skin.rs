use super::*;

use easynpc_shared::SkinRequest;

pub(super) async fn handle_skin_request(
    state: &WsState,
    _request_id: &str,
    request: SkinRequest,
) -> Result<ResponseResult, ServerMessage> {
    let catalog = &state.app.use_cases.skins.catalog;

    let result = match request {
        SkinRequest::ListSkinIds { model } => ResponseResult::success(catalog.list_skin_ids(model)),
        SkinRequest::Resolve { model, skin_id } => {
            respond(catalog.resolve(model, skin_id).map(|entry| entry.to_data()))
        }
        SkinRequest::Page {
            model,
            start_index,
            page_size,
            direction,
        } => ResponseResult::success(
            catalog
                .page(model, start_index, page_size, direction)
                .to_data(),
        ),
        SkinRequest::ResolveActive { npc_id } => {
            respond(catalog.resolve_active(npc_id).map(|entry| entry.to_data()))
        }
    };
    Ok(result)
}
