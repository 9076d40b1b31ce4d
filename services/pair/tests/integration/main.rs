mod helpers;
mod missyou_test;
mod partnership_test;
