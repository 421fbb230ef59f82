pub(super) mod navigation;
