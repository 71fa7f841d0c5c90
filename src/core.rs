//! Core logic: conversion features, history and persistence

pub mod features;
pub mod history;
pub mod storage;
