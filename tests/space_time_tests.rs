use ndarray::arr2;

use zebrafish_render::viz::palette::{
    COLOR_EMPTY, COLOR_MELANOPHORE, COLOR_RESERVED, COLOR_XANTHOPHORE,
};
use zebrafish_render::{LabelArray, RESERVED_FILL, RenderError, SpaceTime, Strictness};

#[test]
fn new_matrix_is_all_reserved() {
    let space_time = SpaceTime::new(4, 3);
    assert_eq!(space_time.rows(), 4);
    assert_eq!(space_time.frames(), 3);
    assert!(space_time.matrix().iter().all(|&v| v == RESERVED_FILL));
}

#[test]
fn short_slices_pad_with_reserved_fill() {
    let mut space_time = SpaceTime::new(5, 2);
    space_time
        .accumulate(1, &[2, 1], Strictness::Permissive)
        .unwrap();
    let column: Vec<i32> = space_time.matrix().column(1).to_vec();
    assert_eq!(column, vec![2, 1, 10, 10, 10]);
    let untouched: Vec<i32> = space_time.matrix().column(0).to_vec();
    assert_eq!(untouched, vec![10; 5]);
}

#[test]
fn exact_slices_are_copied() {
    let mut space_time = SpaceTime::new(3, 1);
    space_time
        .accumulate(0, &[0, 1, 2], Strictness::Strict)
        .unwrap();
    assert_eq!(space_time.matrix().column(0).to_vec(), vec![0, 1, 2]);
}

#[test]
fn long_slices_truncate_unless_strict() {
    let mut space_time = SpaceTime::new(2, 2);
    space_time
        .accumulate(0, &[1, 2, 0, 0], Strictness::Permissive)
        .unwrap();
    assert_eq!(space_time.matrix().column(0).to_vec(), vec![1, 2]);

    let err = space_time
        .accumulate(1, &[1, 2, 0], Strictness::Strict)
        .unwrap_err();
    assert!(matches!(err, RenderError::SliceOverflow { len: 3, rows: 2 }));
    assert_eq!(space_time.matrix().column(1).to_vec(), vec![10, 10]);
}

#[test]
fn column_outside_matrix_is_reported() {
    let mut space_time = SpaceTime::new(2, 2);
    let err = space_time
        .accumulate(2, &[1], Strictness::Permissive)
        .unwrap_err();
    assert!(matches!(
        err,
        RenderError::ColumnOutOfRange {
            column: 2,
            columns: 2
        }
    ));
}

#[test]
fn growing_frames_build_a_space_time_diagram() {
    let frames = [
        LabelArray::Scalar(1),
        LabelArray::Grid(arr2(&[[0, 1], [2, 1]])),
        LabelArray::Grid(arr2(&[[0, 1, 2], [2, 1, 0], [1, 1, 1]])),
    ];
    let cut_row = 1;
    let mut space_time = SpaceTime::new(3, frames.len());
    for (column, frame) in frames.iter().enumerate() {
        space_time
            .accumulate(column, &frame.cross_section(cut_row), Strictness::Permissive)
            .unwrap();
    }

    assert_eq!(
        space_time.matrix(),
        &arr2(&[[10, 2, 2], [10, 1, 1], [10, 10, 0]])
    );

    let canvas = space_time.to_canvas();
    assert_eq!(canvas.pixel(0, 0), COLOR_RESERVED);
    assert_eq!(canvas.pixel(0, 1), COLOR_MELANOPHORE);
    assert_eq!(canvas.pixel(1, 2), COLOR_XANTHOPHORE);
    assert_eq!(canvas.pixel(2, 2), COLOR_EMPTY);
    assert_eq!(canvas.count(COLOR_RESERVED), 4);
}
