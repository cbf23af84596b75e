/// 상품 조회
pub const GET_ITEM: &str = "SELECT id, title, description, image_url, starting_price, current_price, end_date, status, seller_id, created_at FROM items WHERE id = $1";

/// 상품 조회 (행 잠금)
pub const GET_ITEM_FOR_UPDATE: &str = "SELECT id, title, description, image_url, starting_price, current_price, end_date, status, seller_id, created_at FROM items WHERE id = $1 FOR UPDATE";

/// 모든 상품 조회
pub const GET_ALL_ITEMS: &str =
    "SELECT id, title, description, image_url, starting_price, current_price, end_date, status, seller_id, created_at FROM items ORDER BY created_at DESC, id DESC";

/// 상품 등록
pub const INSERT_ITEM: &str = r#"
    INSERT INTO items (title, description, image_url, starting_price, current_price, end_date, status, seller_id)
    VALUES ($1, $2, $3, $4, $4, $5, 'active', $6)
    RETURNING id, title, description, image_url, starting_price, current_price, end_date, status, seller_id, created_at
"#;

/// 상품 부분 수정. 시작 가격이 주어지면 현재 가격도 함께 맞춘다.
pub const UPDATE_ITEM: &str = r#"
    UPDATE items SET
        title = COALESCE($2, title),
        description = COALESCE($3, description),
        image_url = COALESCE($4, image_url),
        end_date = COALESCE($5, end_date),
        status = COALESCE($6, status),
        starting_price = COALESCE($7, starting_price),
        current_price = COALESCE($7, current_price)
    WHERE id = $1
    RETURNING id, title, description, image_url, starting_price, current_price, end_date, status, seller_id, created_at
"#;

/// 상품 삭제
pub const DELETE_ITEM: &str = "DELETE FROM items WHERE id = $1";

/// 상품 입찰 존재 여부
pub const ITEM_HAS_BIDS: &str = "SELECT EXISTS (SELECT 1 FROM bids WHERE item_id = $1)";

/// 조건부 가격 갱신: active 상태이고 현재 가격보다 높을 때만
pub const RAISE_CURRENT_PRICE: &str = r#"
    UPDATE items SET current_price = $1
    WHERE id = $2 AND status = 'active' AND current_price < $1
    RETURNING id, title, description, image_url, starting_price, current_price, end_date, status, seller_id, created_at
"#;

/// 입찰 기록 추가. 행 잠금 구간 안에서 실제 시각을 찍는다.
pub const INSERT_BID: &str = r#"
    INSERT INTO bids (item_id, bidder_id, amount, placed_at)
    VALUES ($1, $2, $3, clock_timestamp())
    RETURNING id, item_id, bidder_id, amount, placed_at
"#;

/// 상품 입찰 조회 (금액 내림차순)
pub const GET_ITEM_BIDS: &str = r#"
    SELECT id, item_id, bidder_id, amount, placed_at
    FROM bids
    WHERE item_id = $1
    ORDER BY amount DESC, id DESC
"#;

/// 사용자 입찰 조회 (시각 내림차순)
pub const GET_BIDDER_BIDS: &str = r#"
    SELECT id, item_id, bidder_id, amount, placed_at
    FROM bids
    WHERE bidder_id = $1
    ORDER BY placed_at DESC, id DESC
"#;
