use relay_ranking::{Medal, display_name, ip_user_names, rank_rows};

#[test]
fn rows_are_numbered_in_input_order() {
    let counts = [3, 9, 1, 7];
    let rows = rank_rows(&counts);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].rank, 1);
    assert_eq!(*rows[1].record, 9);
    assert_eq!(rows[3].rank, 4);
}

#[test]
fn top_three_get_medals() {
    let rows = rank_rows(&["a", "b", "c", "d"]);
    let medals: Vec<Option<Medal>> = rows.iter().map(|row| row.medal).collect();
    assert_eq!(
        medals,
        vec![
            Some(Medal::Gold),
            Some(Medal::Silver),
            Some(Medal::Bronze),
            None
        ]
    );
}

#[test]
fn display_name_prefers_nickname() {
    assert_eq!(display_name("Alice", "alice"), "Alice");
    assert_eq!(display_name("", "alice"), "alice");
}

#[test]
fn ip_users_are_joined_or_dashed() {
    assert_eq!(ip_user_names("A,,B", "a,b"), "A, B");
    assert_eq!(ip_user_names("", "a,b"), "a, b");
    assert_eq!(ip_user_names("", ""), "-");
    assert_eq!(ip_user_names(",", ""), "-");
}
