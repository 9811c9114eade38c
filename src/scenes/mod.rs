// Copyright @yucwang 2026

pub mod box_scene;
