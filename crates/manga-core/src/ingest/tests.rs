use super::*;

fn entries(paths: &[&str]) -> Vec<FileEntry> {
    paths
        .iter()
        .map(|p| FileEntry::new(*p, format!("/picked/{p}")))
        .collect()
}

fn titles(chapters: &[Chapter]) -> Vec<&str> {
    chapters.iter().map(Chapter::title).collect()
}

#[test]
fn chapter_pattern_is_anchored_and_case_insensitive() {
    assert!(is_chapter_folder("chapter_2024-01"));
    assert!(is_chapter_folder("Chapter_2024-01"));
    assert!(is_chapter_folder("CHAPTER_1999-12"));
    assert!(!is_chapter_folder("chapter_2024-1"));
    assert!(!is_chapter_folder("chapter_24-01"));
    assert!(!is_chapter_folder("chapter_2024_01"));
    assert!(!is_chapter_folder("xchapter_2024-01"));
    assert!(!is_chapter_folder("chapter_2024-01x"));
    assert!(!is_chapter_folder("chapter_20a4-01"));
    assert!(!is_chapter_folder("chäpter_2024-01"));
}

#[test]
fn orders_chapters_and_pages_numerically() {
    let chapters = group_chapters(entries(&[
        "manga/chapter_2024-02/001.jpg",
        "manga/chapter_2024-01/010.jpg",
        "manga/chapter_2024-01/002.jpg",
    ]));
    assert_eq!(titles(&chapters), vec!["chapter_2024-01", "chapter_2024-02"]);
    let mut first = chapters[0].clone();
    first.materialize();
    let names: Vec<&str> = first.pages().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["002.jpg", "010.jpg"]);
}

#[test]
fn month_ten_sorts_after_month_two() {
    let chapters = group_chapters(entries(&[
        "m/chapter_2024-10/1.png",
        "m/chapter_2024-02/1.png",
    ]));
    assert_eq!(titles(&chapters), vec!["chapter_2024-02", "chapter_2024-10"]);
}

#[test]
fn files_outside_chapter_folders_are_dropped() {
    let chapters = group_chapters(entries(&[
        "manga/junk/a.png",
        "manga/cover.png",
        "",
        "manga/chapter_2024-01/001.png",
    ]));
    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].page_count(), 1);
}

#[test]
fn only_unmatched_paths_yield_empty_list() {
    let chapters = group_chapters(entries(&["a/b.png", "c/d/e.png"]));
    assert!(chapters.is_empty());
    assert!(group_chapters(Vec::new()).is_empty());
}

#[test]
fn nested_chapter_folders_use_the_outermost() {
    let chapters = group_chapters(entries(&[
        "m/chapter_2024-01/chapter_2024-02/001.png",
        "m/chapter_2024-02/001.png",
    ]));
    assert_eq!(titles(&chapters), vec!["chapter_2024-01", "chapter_2024-02"]);
    assert_eq!(chapters[0].page_count(), 1);
    assert_eq!(chapters[1].page_count(), 1);
}

#[test]
fn regrouping_is_independent_of_input_order() {
    let paths = [
        "m/chapter_2024-03/003.png",
        "m/chapter_2024-01/10.png",
        "m/chapter_2024-01/9.png",
        "m/chapter_2024-03/001.png",
        "m/chapter_2023-12/a.png",
    ];
    let forward = group_chapters(entries(&paths));
    let mut reversed_paths = paths;
    reversed_paths.reverse();
    let reversed = group_chapters(entries(&reversed_paths));
    assert_eq!(forward, reversed);
    assert_eq!(forward, group_chapters(entries(&paths)));
    assert_eq!(
        forward[1].page_ids(),
        vec!["m/chapter_2024-01/9.png", "m/chapter_2024-01/10.png"]
    );
}

#[test]
fn duplicate_paths_collapse_to_one_page() {
    let chapters = group_chapters(entries(&[
        "m/chapter_2024-01/001.png",
        "m/chapter_2024-01/001.png",
    ]));
    assert_eq!(chapters[0].page_count(), 1);
}

#[test]
fn differently_cased_folders_are_separate_chapters() {
    let chapters = group_chapters(entries(&[
        "m/Chapter_2024-01/001.png",
        "m/chapter_2024-01/001.png",
    ]));
    assert_eq!(titles(&chapters), vec!["Chapter_2024-01", "chapter_2024-01"]);
}
